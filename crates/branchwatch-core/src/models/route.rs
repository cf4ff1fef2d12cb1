//! Dataset categories served by the data endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three branch dataset categories.
///
/// The lowercase name is both the `route` query value sent to the endpoint
/// and the key used by profiles and the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Main,
    Courier,
    Franchise,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Main, Route::Courier, Route::Franchise]
    }

    /// Returns the value sent as the `route` query parameter.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Route::Main => "main",
            Route::Courier => "courier",
            Route::Franchise => "franchise",
        }
    }

    /// Returns the display title of the route.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Main => "Main",
            Route::Courier => "Courier",
            Route::Franchise => "Franchise",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when parsing an unknown route name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown route '{}' (expected main, courier or franchise)",
            self.0
        )
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(Route::Main),
            "courier" => Ok(Route::Courier),
            "franchise" => Ok(Route::Franchise),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse_roundtrip() {
        for route in Route::all() {
            assert_eq!(route.wire_name().parse::<Route>(), Ok(*route));
        }
        assert_eq!(" Courier ".parse::<Route>(), Ok(Route::Courier));
    }

    #[test]
    fn test_route_parse_unknown() {
        let err = "warehouse".parse::<Route>().unwrap_err();
        assert!(err.to_string().contains("warehouse"));
    }

    #[test]
    fn test_route_serde_lowercase() {
        let json = serde_json::to_string(&Route::Franchise).unwrap();
        assert_eq!(json, "\"franchise\"");
        let route: Route = serde_json::from_str("\"main\"").unwrap();
        assert_eq!(route, Route::Main);
    }
}

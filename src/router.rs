// Path-based routes. Four paths map onto the three views.

use crate::book::BookId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/add`
    Add,
    /// `/edit/{id}`
    Edit(BookId),
    /// `/view/{id}`
    View(BookId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No page at '{0}'")]
    Unknown(String),
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::List),
            ["add"] => Ok(Route::Add),
            ["edit", raw] => Ok(Route::Edit(BookId::from(*raw))),
            ["view", raw] => Ok(Route::View(BookId::from(*raw))),
            _ => Err(RouteError::Unknown(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => f.write_str("/"),
            Route::Add => f.write_str("/add"),
            Route::Edit(id) => write!(f, "/edit/{}", id),
            Route::View(id) => write!(f, "/view/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_four_routes() {
        assert_eq!("/".parse(), Ok(Route::List));
        assert_eq!("".parse(), Ok(Route::List));
        assert_eq!("/add".parse(), Ok(Route::Add));
        assert_eq!("/edit/12".parse(), Ok(Route::Edit(12.into())));
        assert_eq!("/view/3/".parse(), Ok(Route::View(3.into())));
    }

    #[test]
    fn any_segment_is_an_id() {
        assert_eq!("/view/9b2e".parse(), Ok(Route::View("9b2e".into())));
        assert_eq!(Route::View("9b2e".into()).to_string(), "/view/9b2e");
        assert_eq!(
            "/edit/01HZX3".parse(),
            Ok(Route::Edit(BookId::Text("01HZX3".into())))
        );
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(
            "/books".parse::<Route>(),
            Err(RouteError::Unknown("/books".into()))
        );
        assert_eq!(
            "/edit".parse::<Route>(),
            Err(RouteError::Unknown("/edit".into()))
        );
        assert_eq!(
            "/view/1/extra".parse::<Route>(),
            Err(RouteError::Unknown("/view/1/extra".into()))
        );
    }

    #[test]
    fn display_round_trips() {
        for route in [
            Route::List,
            Route::Add,
            Route::Edit(5.into()),
            Route::View("9b2e".into()),
        ] {
            assert_eq!(route.to_string().parse(), Ok(route));
        }
    }
}

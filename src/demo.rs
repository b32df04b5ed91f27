//! Sample applications served by the `minirouter` binary.
//!
//! Each builder returns a fully registered [`Router`]; pass `None` for
//! `types_enabled` to keep the application's own coercion default.

use crate::dispatcher::{handler_fn, ParamSpec};
use crate::error::{HandlerError, RouterError};
use crate::router::Router;
use clap::ValueEnum;

/// The bundled applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoApp {
    /// `GET /hello`, `POST /echo`
    Hello,
    /// `GET /book/<id>`, `GET /user/<username>`
    Params,
    /// `GET /book/<id>/page/<number>/paragraph/<section>`
    Multi,
    /// `GET /book/<id:int>` with coercion on
    Typed,
}

impl DemoApp {
    /// Coercion default the application is written for.
    #[must_use]
    pub fn default_types_enabled(self) -> bool {
        matches!(self, Self::Typed)
    }

    /// Build the application's router.
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] if a registration fails.
    pub fn build(self, name: &str, types_enabled: Option<bool>) -> Result<Router, RouterError> {
        let types_enabled = types_enabled.unwrap_or_else(|| self.default_types_enabled());
        let mut router = Router::new(name, types_enabled);
        match self {
            Self::Hello => {
                router
                    .get("/hello", handler_fn(&[], |_| Ok("Hello, world!")))?
                    .post("/echo", handler_fn(&[], |_| Ok("Post received")))?;
            }
            Self::Params => {
                router
                    .get(
                        "/book/<id>",
                        handler_fn(&[ParamSpec::str("id")], |p| {
                            Ok(format!("Book ID is {}", p.str("id")?))
                        }),
                    )?
                    .get(
                        "/user/<username>",
                        handler_fn(&[ParamSpec::str("username")], |p| {
                            Ok(format!("Welcome, {}", p.str("username")?))
                        }),
                    )?;
            }
            Self::Multi => {
                let signature = [
                    ParamSpec::str("id"),
                    ParamSpec::str("number"),
                    ParamSpec::str("section"),
                ];
                router.get(
                    "/book/<id>/page/<number>/paragraph/<section>",
                    handler_fn(&signature, |p| {
                        Ok(format!(
                            "Book ID: {}, Page Number: {}, Paragraph: {}",
                            p.str("id")?,
                            p.str("number")?,
                            p.str("section")?
                        ))
                    }),
                )?;
            }
            Self::Typed => {
                // With coercion off the id arrives as the raw segment.
                let id = if types_enabled {
                    ParamSpec::int("id")
                } else {
                    ParamSpec::str("id")
                };
                router.get(
                    "/book/<id:int>",
                    handler_fn(&[id], |p| {
                        let id = p
                            .get("id")
                            .ok_or_else(|| HandlerError::invalid("missing parameter 'id'"))?;
                        Ok(format!("Book #{id}"))
                    }),
                )?;
            }
        }
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_app_builds_with_its_default() {
        for app in DemoApp::value_variants() {
            let router = app.build("Router", None).unwrap();
            assert!(!router.is_empty());
            assert_eq!(router.types_enabled(), app.default_types_enabled());
        }
    }

    #[test]
    fn test_typed_app_serves_raw_id_without_coercion() {
        let router = DemoApp::Typed.build("Router", Some(false)).unwrap();
        assert!(!router.types_enabled());

        let res = router.handle("GET", "/book/x");
        assert_eq!(res.status.as_u16(), 200);
        assert_eq!(res.body_str(), Some("Book #x"));
        assert_eq!(router.handle("GET", "/book/7").body_str(), Some("Book #7"));
    }

    #[test]
    fn test_typed_app_coerces_by_default() {
        let router = DemoApp::Typed.build("Router", None).unwrap();
        assert_eq!(router.handle("GET", "/book/x").status.as_u16(), 400);
        assert_eq!(router.handle("GET", "/book/007").body_str(), Some("Book #7"));
    }

    #[test]
    fn test_multi_app_response() {
        let router = DemoApp::Multi.build("Router", None).unwrap();
        let res = router.handle("GET", "/book/12/page/3/paragraph/b");
        assert_eq!(
            res.body_str(),
            Some("Book ID: 12, Page Number: 3, Paragraph: b")
        );
    }
}

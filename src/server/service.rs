use super::response::write_handler_response;
use crate::ids::RequestId;
use crate::router::Router;
use may_minihttp::{HttpService, Request, Response};
use std::borrow::Cow;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span};

/// `may_minihttp` service that hands every request to a frozen [`Router`].
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
}

impl AppService {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

/// Request path without its query string, percent-decoded.
///
/// Paths that do not decode to UTF-8 are routed as received.
#[must_use]
pub fn request_path(raw: &str) -> Cow<'_, str> {
    let path = raw.split('?').next().unwrap_or("/");
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let request_id = RequestId::from_header_or_new(
            req.headers()
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case("x-request-id"))
                .and_then(|h| std::str::from_utf8(h.value).ok()),
        );
        let method = req.method();
        let path = request_path(req.path());

        let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
        let _guard = span.enter();

        let start = Instant::now();
        let response = self.router.handle(method, &path);
        info!(
            status = response.status.as_u16(),
            bytes = response.body.len(),
            duration_us = start.elapsed().as_micros(),
            "Request handled"
        );

        write_handler_response(res, response);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_strips_query() {
        assert_eq!(request_path("/book/7?x=1"), "/book/7");
        assert_eq!(request_path("/"), "/");
    }

    #[test]
    fn test_request_path_decodes_percent_escapes() {
        assert_eq!(request_path("/user/j%C3%BCrgen"), "/user/jürgen");
        assert_eq!(request_path("/a%2Fb"), "/a/b");
    }

    #[test]
    fn test_request_path_keeps_undecodable_input() {
        assert_eq!(request_path("/bad/%FF"), "/bad/%FF");
    }
}

use crate::dispatcher::{HandlerResponse, CONTENT_TYPE_TEXT};
use http::StatusCode;
use may_minihttp::Response;

const CONTENT_TYPE_HEADER: &str = "Content-Type: text/plain; charset=utf-8";

fn status_reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Copy a rendered [`HandlerResponse`] onto the transport response.
///
/// `may_minihttp` writes `Content-Length` itself from the body it is given, so
/// only the content type is copied across.
pub fn write_handler_response(res: &mut Response, response: HandlerResponse) {
    debug_assert_eq!(
        response.get_header("Content-Type"),
        Some(CONTENT_TYPE_TEXT),
        "router responses are always plain text"
    );
    res.status_code(usize::from(response.status.as_u16()), status_reason(response.status));
    res.header(CONTENT_TYPE_HEADER);
    res.body_vec(response.body);
}

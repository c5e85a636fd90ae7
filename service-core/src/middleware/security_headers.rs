use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Path prefix under which uploaded media is served.
const MEDIA_PREFIX: &str = "/uploads/";

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_media_route = req.uri().path().starts_with(MEDIA_PREFIX);

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    if is_media_route {
        // Audio and cover art are embedded by players hosted on other origins.
        headers.insert(
            header::HeaderName::from_static("cross-origin-resource-policy"),
            header::HeaderValue::from_static("cross-origin"),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
    }

    response
}

use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    let body = markup.into_string();

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .map_err(|_| crate::errors::ServerError::InternalError)?;

    Ok(resp)
}

/// 303 so form POSTs land back on a GET page.
pub fn redirect_response(location: &str) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| crate::errors::ServerError::InternalError)?;

    Ok(resp)
}

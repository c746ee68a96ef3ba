//! `Network` backed by `fetch`

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response, Window};

use tramite_site::{Network, NetworkResponse, Result, SiteError, SubmissionRequest};

use crate::js::describe;

pub struct FetchNetwork {
    window: Window,
}

impl FetchNetwork {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    async fn fetch(&self, request: &SubmissionRequest) -> std::result::Result<Response, JsValue> {
        let body = FormData::new()?;
        for (name, value) in request.body.entries() {
            body.append_with_str(name, value)?;
        }

        let headers = Headers::new()?;
        for (name, value) in &request.headers {
            headers.set(name, value)?;
        }

        let init = RequestInit::new();
        init.set_method(&request.method);
        init.set_body(&body);
        init.set_headers(&headers);

        let request = Request::new_with_str_and_init(&request.url, &init)?;
        let response = JsFuture::from(self.window.fetch_with_request(&request)).await?;
        response.dyn_into::<Response>()
    }
}

#[async_trait(?Send)]
impl Network for FetchNetwork {
    async fn send(&self, request: &SubmissionRequest) -> Result<NetworkResponse> {
        let response = self
            .fetch(request)
            .await
            .map_err(|err| SiteError::Transport(describe(&err)))?;
        Ok(NetworkResponse::new(response.status()))
    }
}

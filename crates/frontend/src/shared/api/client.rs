use std::rc::Rc;

use contracts::shared::upload::UPLOAD_FILE_FIELD;
use contracts::system::auth::ApiError;
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use super::error::{error_from_body, unpack, RequestFailure};
use crate::shared::api_utils::{api_url, with_query};
use crate::shared::config::ClientConfig;
use crate::system::auth::storage::AuthStorage;

/// Путь страницы входа для принудительного редиректа при 401
pub const LOGIN_PATH: &str = "/auth/login";

/// Эндпоинты, где 401 означает неверные данные формы, а не истёкшую сессию
const CREDENTIAL_ENDPOINTS: &[&str] = &["auth/login", "auth/register"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// HTTP клиент API
///
/// - `Authorization: Bearer <token>`, если токен сохранён
/// - единый таймаут на каждую попытку
/// - повторы только для GET (транспорт, таймаут, 5xx)
/// - `upload`: multipart с файлом
/// - 401: сохранённая сессия очищается, жёсткий переход на страницу входа
///   (кроме login/register: там это ошибка формы)
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    auth: AuthStorage,
}

impl ApiClient {
    pub fn new(config: ClientConfig, auth: AuthStorage) -> Self {
        Self {
            config: Rc::new(config),
            auth,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth_storage(&self) -> &AuthStorage {
        &self.auth
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = api_url(&self.config, endpoint);
        self.execute(HttpMethod::Get, endpoint, url, None).await
    }

    /// GET с параметрами из типизированной структуры
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, params: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let url = with_query(&api_url(&self.config, endpoint), params)?;
        self.execute(HttpMethod::Get, endpoint, url, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = api_url(&self.config, endpoint);
        self.execute(HttpMethod::Post, endpoint, url, Some(encode_body(body)?))
            .await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = api_url(&self.config, endpoint);
        self.execute(HttpMethod::Put, endpoint, url, Some(encode_body(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = api_url(&self.config, endpoint);
        self.execute(HttpMethod::Delete, endpoint, url, None).await
    }

    /// multipart POST: файл в поле `file` и текстовые поля; без повторов
    pub async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        file: &File,
        fields: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = api_url(&self.config, endpoint);
        let result = match self.build_upload(&url, file, fields) {
            Ok(request) => self.send(request).await,
            Err(failure) => Err(failure),
        }
        .and_then(|(status, text)| unpack::<T>(status, &text));

        result.map_err(|failure| self.fail(HttpMethod::Post, endpoint, &url, failure))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        url: String,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let max_attempts = max_attempts(method, self.config.retry_attempts);
        let mut attempt = 1;

        loop {
            let result = match self.build_request(method, &url, body.as_deref()) {
                Ok(request) => self.send(request).await,
                Err(failure) => Err(failure),
            }
            .and_then(|(status, text)| unpack::<T>(status, &text));

            let failure = match result {
                Ok(data) => return Ok(data),
                Err(failure) => failure,
            };

            if attempt < max_attempts && failure.is_retryable() {
                log::warn!(
                    "{} {} failed (attempt {}/{}): {:?}",
                    method.as_str(),
                    url,
                    attempt,
                    max_attempts,
                    failure
                );
                attempt += 1;
                continue;
            }
            return Err(self.fail(method, endpoint, &url, failure));
        }
    }

    /// Итоговая ошибка запроса; 401 (кроме login/register) сбрасывает сессию
    fn fail(&self, method: HttpMethod, endpoint: &str, url: &str, failure: RequestFailure) -> ApiError {
        if failure.is_unauthorized() && redirects_on_unauthorized(endpoint) {
            self.handle_unauthorized();
            return failure.into();
        }
        let error: ApiError = failure.into();
        log::error!("{} {} failed: {}", method.as_str(), url, error);
        error
    }

    /// Одна попытка с таймаутом; не-2xx превращается в `Status`
    async fn send(&self, request: Request) -> Result<(u16, String), RequestFailure> {
        let timeout_ms = self.config.timeout_ms;
        let send = Box::pin(request.send());
        let timeout = Box::pin(TimeoutFuture::new(timeout_ms));

        let response = match select(send, timeout).await {
            Either::Left((result, _)) => {
                result.map_err(|e| RequestFailure::Transport(e.to_string()))?
            }
            Either::Right(_) => return Err(RequestFailure::Timeout(timeout_ms)),
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        if (200..300).contains(&status) {
            Ok((status, text))
        } else {
            Err(RequestFailure::Status(error_from_body(status, &text)))
        }
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.auth.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> Result<Request, RequestFailure> {
        let builder: RequestBuilder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        }
        .header("Content-Type", "application/json")
        .header("Accept", "application/json");
        let builder = self.with_auth(builder);

        let request = match body {
            Some(body) => builder.body(body.to_string()),
            None => builder.build(),
        };
        request.map_err(|e| RequestFailure::Transport(e.to_string()))
    }

    /// Content-Type с boundary выставляет браузер
    fn build_upload(
        &self,
        url: &str,
        file: &File,
        fields: &[(&str, &str)],
    ) -> Result<Request, RequestFailure> {
        let form = FormData::new().map_err(js_failure)?;
        form.append_with_blob(UPLOAD_FILE_FIELD, file)
            .map_err(js_failure)?;
        for (name, value) in fields {
            form.append_with_str(name, value).map_err(js_failure)?;
        }

        self.with_auth(Request::post(url).header("Accept", "application/json"))
            .body(form)
            .map_err(|e| RequestFailure::Transport(e.to_string()))
    }

    fn handle_unauthorized(&self) {
        log::warn!("Received 401, clearing session and redirecting to {}", LOGIN_PATH);
        self.auth.clear();
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(LOGIN_PATH) {
                log::warn!("Redirect to {} failed: {:?}", LOGIN_PATH, e);
            }
        }
    }
}

/// 401 на login/register отдаётся форме как ошибка, без сброса сессии
fn redirects_on_unauthorized(endpoint: &str) -> bool {
    let endpoint = endpoint.trim_start_matches('/');
    !CREDENTIAL_ENDPOINTS.contains(&endpoint)
}

/// Всего попыток: GET = 1 + retry_attempts, остальные ровно одна
fn max_attempts(method: HttpMethod, retry_attempts: u32) -> u32 {
    match method {
        HttpMethod::Get => retry_attempts.saturating_add(1),
        _ => 1,
    }
}

fn js_failure(err: JsValue) -> RequestFailure {
    RequestFailure::Transport(format!("{:?}", err))
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body)
        .map_err(|e| ApiError::client(format!("Failed to serialize request: {}", e)))
}

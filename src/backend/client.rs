//! # Cliente HTTP del backend
//!
//! Envoltorio fino sobre `reqwest`: JSON de entrada y salida, cabecera Basic
//! opcional, sin reintentos ni caché. Toda la lógica de negocio vive en el
//! backend; aquí solo se traducen llamadas tipadas a peticiones HTTP.

use std::env;
use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::error::{ApiError, ApiResult};
use super::models::*;

/// Credenciales del panel de administración.
///
/// Solo viven en memoria durante la sesión y viajan en cada llamada de
/// administración como cabecera `Authorization: Basic ...`.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Endpoints públicos de la web
#[async_trait]
pub trait PublicApi: Send + Sync {
    async fn get_menu(&self) -> ApiResult<MenuResponse>;
    async fn get_menu_categories(&self, kind: CategoryKind) -> ApiResult<Vec<MenuCategoryNode>>;
    async fn get_config(&self) -> ApiResult<Vec<ConfigEntry>>;
    async fn get_events(&self) -> ApiResult<Vec<EventDto>>;
    /// El horario no tiene contrato cerrado; se devuelve el JSON tal cual
    /// (`Null` si el backend no envía cuerpo).
    async fn get_schedule(&self, from: Option<&str>, to: Option<&str>) -> ApiResult<serde_json::Value>;
    async fn get_availability(&self, date: &str, party_size: u32) -> ApiResult<AvailabilityResponse>;
    async fn create_reservation(&self, payload: &NewReservation) -> ApiResult<ReservationOut>;
    async fn cancel_reservation(&self, id: &str, reason: Option<&str>) -> ApiResult<()>;
    async fn contact_projects(&self, payload: &ProjectContactPayload) -> ApiResult<ProjectContactReceipt>;
}

/// Endpoints bajo `/admin/*`, todos con credenciales Basic
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_config(&self, auth: &BasicAuth) -> ApiResult<Vec<ConfigEntry>>;
    async fn set_config(&self, auth: &BasicAuth, key: &str, value: &str) -> ApiResult<()>;

    async fn create_food(&self, auth: &BasicAuth, payload: &NewFood) -> ApiResult<()>;
    async fn create_wine(&self, auth: &BasicAuth, payload: &NewWine) -> ApiResult<()>;
    async fn update_menu_item(&self, auth: &BasicAuth, id: &str, patch: &MenuItemPatch) -> ApiResult<()>;
    async fn delete_menu_item(&self, auth: &BasicAuth, id: &str) -> ApiResult<()>;

    async fn list_menu_categories(&self, auth: &BasicAuth) -> ApiResult<Vec<MenuCategoryNode>>;
    async fn create_menu_category(&self, auth: &BasicAuth, payload: &NewMenuCategory) -> ApiResult<()>;
    async fn delete_menu_category(&self, auth: &BasicAuth, id: i64) -> ApiResult<()>;

    async fn list_events(&self, auth: &BasicAuth) -> ApiResult<Vec<EventDto>>;
    async fn create_event(&self, auth: &BasicAuth, payload: &EventPayload) -> ApiResult<()>;
    async fn update_event(&self, auth: &BasicAuth, id: &str, payload: &EventPayload) -> ApiResult<()>;
    async fn delete_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()>;
    async fn publish_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()>;
    async fn unpublish_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()>;

    async fn list_project_contacts(
        &self,
        auth: &BasicAuth,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<ProjectContactItem>>;
    async fn project_contact_stats(&self, auth: &BasicAuth) -> ApiResult<ProjectContactStats>;
    async fn mark_project_contact_read(&self, auth: &BasicAuth, id: &str) -> ApiResult<()>;

    async fn upsert_schedule_day(&self, auth: &BasicAuth, day: &ScheduleDay) -> ApiResult<()>;
    async fn add_service_window(&self, auth: &BasicAuth, window: &ServiceWindow) -> ApiResult<()>;
}

/// Cliente único contra el origen del backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reutiliza un `reqwest::Client` existente (pool de conexiones compartido)
    pub fn with_client(client: reqwest::Client, base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Crea el cliente a partir de `BACKEND_URL` (default: http://localhost:8000)
    pub fn from_env() -> ApiResult<Self> {
        let backend_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        tracing::info!(backend_url = %backend_url, "Cliente del backend configurado");
        Self::new(&backend_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Construye la URL a partir de segmentos; cada segmento se codifica
    /// (ids y claves de configuración pueden llevar caracteres reservados).
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Primitiva única de petición.
    ///
    /// Devuelve el texto del cuerpo solo si la respuesta es 2xx, no es 204,
    /// declara `application/json` y no está vacía. En cualquier otro caso 2xx
    /// devuelve `None`.
    async fn send<B>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        body: Option<&B>,
        auth: Option<&BasicAuth>,
    ) -> ApiResult<Option<String>>
    where
        B: Serialize + ?Sized + Sync,
    {
        let endpoint = url.path().to_string();
        tracing::debug!(method = %method, endpoint = %endpoint, "Petición al backend");

        let mut request = self.client.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(auth) = auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(
                method = %method,
                endpoint = %endpoint,
                status = status.as_u16(),
                "El backend respondió con error"
            );
            return Err(ApiError::status(status.as_u16(), &text));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Ok(None);
        }

        let text = response.text().await.unwrap_or_default();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(text))
    }

    /// Petición que exige un cuerpo JSON con la forma `T`
    async fn fetch<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
        auth: Option<&BasicAuth>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(segments)?;
        let endpoint = url.path().to_string();
        let text = self
            .send(method, url, query, body, auth)
            .await?
            .ok_or_else(|| ApiError::empty(&endpoint))?;
        decode(&endpoint, &text)
    }

    /// Petición cuyo cuerpo de respuesta no interesa
    async fn execute<B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
        auth: Option<&BasicAuth>,
    ) -> ApiResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(segments)?;
        self.send(method, url, query, body, auth).await?;
        Ok(())
    }
}

/// Decodifica el JSON recibido; un desajuste es un error propio, nunca un default
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, text: &str) -> ApiResult<T> {
    serde_json::from_str(text).map_err(|e| ApiError::shape(endpoint, e))
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl PublicApi for BackendClient {
    async fn get_menu(&self) -> ApiResult<MenuResponse> {
        self.fetch(Method::GET, &["api", "v1", "menu"], &[], NO_BODY, None)
            .await
    }

    async fn get_menu_categories(&self, kind: CategoryKind) -> ApiResult<Vec<MenuCategoryNode>> {
        let query = [("category", kind.query_value().to_string())];
        self.fetch(
            Method::GET,
            &["api", "v1", "menu", "categories"],
            &query,
            NO_BODY,
            None,
        )
        .await
    }

    async fn get_config(&self) -> ApiResult<Vec<ConfigEntry>> {
        let listing: Listing<ConfigEntry> = self
            .fetch(Method::GET, &["api", "v1", "config"], &[], NO_BODY, None)
            .await?;
        Ok(listing.into_items())
    }

    async fn get_events(&self) -> ApiResult<Vec<EventDto>> {
        let listing: Listing<EventDto> = self
            .fetch(Method::GET, &["api", "v1", "events"], &[], NO_BODY, None)
            .await?;
        Ok(listing.into_items())
    }

    async fn get_schedule(&self, from: Option<&str>, to: Option<&str>) -> ApiResult<serde_json::Value> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from_", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        let url = self.url(&["api", "v1", "schedule"])?;
        let endpoint = url.path().to_string();
        match self.send(Method::GET, url, &query, NO_BODY, None).await? {
            Some(text) => decode(&endpoint, &text),
            None => Ok(serde_json::Value::Null),
        }
    }

    async fn get_availability(&self, date: &str, party_size: u32) -> ApiResult<AvailabilityResponse> {
        let query = [
            ("date", date.to_string()),
            ("partySize", party_size.to_string()),
        ];
        self.fetch(Method::GET, &["api", "v1", "availability"], &query, NO_BODY, None)
            .await
    }

    async fn create_reservation(&self, payload: &NewReservation) -> ApiResult<ReservationOut> {
        self.fetch(
            Method::POST,
            &["api", "v1", "reservations"],
            &[],
            Some(payload),
            None,
        )
        .await
    }

    async fn cancel_reservation(&self, id: &str, reason: Option<&str>) -> ApiResult<()> {
        let body = serde_json::json!({ "reason": reason });
        self.execute(
            Method::POST,
            &["api", "v1", "reservations", id, "cancel"],
            &[],
            Some(&body),
            None,
        )
        .await
    }

    async fn contact_projects(&self, payload: &ProjectContactPayload) -> ApiResult<ProjectContactReceipt> {
        self.fetch(
            Method::POST,
            &["api", "v1", "contacts", "projects"],
            &[],
            Some(payload),
            None,
        )
        .await
    }
}

#[async_trait]
impl AdminApi for BackendClient {
    async fn list_config(&self, auth: &BasicAuth) -> ApiResult<Vec<ConfigEntry>> {
        let listing: Listing<ConfigEntry> = self
            .fetch(Method::GET, &["admin", "config"], &[], NO_BODY, Some(auth))
            .await?;
        Ok(listing.into_items())
    }

    async fn set_config(&self, auth: &BasicAuth, key: &str, value: &str) -> ApiResult<()> {
        let body = ConfigEntry {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.execute(Method::PUT, &["admin", "config", key], &[], Some(&body), Some(auth))
            .await
    }

    async fn create_food(&self, auth: &BasicAuth, payload: &NewFood) -> ApiResult<()> {
        self.execute(Method::POST, &["admin", "menu", "food"], &[], Some(payload), Some(auth))
            .await
    }

    async fn create_wine(&self, auth: &BasicAuth, payload: &NewWine) -> ApiResult<()> {
        self.execute(Method::POST, &["admin", "menu", "wines"], &[], Some(payload), Some(auth))
            .await
    }

    async fn update_menu_item(&self, auth: &BasicAuth, id: &str, patch: &MenuItemPatch) -> ApiResult<()> {
        self.execute(Method::PUT, &["admin", "menu", id], &[], Some(patch), Some(auth))
            .await
    }

    async fn delete_menu_item(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        self.execute(Method::DELETE, &["admin", "menu", id], &[], NO_BODY, Some(auth))
            .await
    }

    async fn list_menu_categories(&self, auth: &BasicAuth) -> ApiResult<Vec<MenuCategoryNode>> {
        self.fetch(
            Method::GET,
            &["admin", "menu", "categories"],
            &[],
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn create_menu_category(&self, auth: &BasicAuth, payload: &NewMenuCategory) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &["admin", "menu", "categories"],
            &[],
            Some(payload),
            Some(auth),
        )
        .await
    }

    async fn delete_menu_category(&self, auth: &BasicAuth, id: i64) -> ApiResult<()> {
        let id = id.to_string();
        self.execute(
            Method::DELETE,
            &["admin", "menu", "categories", id.as_str()],
            &[],
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn list_events(&self, auth: &BasicAuth) -> ApiResult<Vec<EventDto>> {
        let listing: Listing<EventDto> = self
            .fetch(Method::GET, &["admin", "events"], &[], NO_BODY, Some(auth))
            .await?;
        Ok(listing.into_items())
    }

    async fn create_event(&self, auth: &BasicAuth, payload: &EventPayload) -> ApiResult<()> {
        self.execute(Method::POST, &["admin", "events"], &[], Some(payload), Some(auth))
            .await
    }

    async fn update_event(&self, auth: &BasicAuth, id: &str, payload: &EventPayload) -> ApiResult<()> {
        self.execute(Method::PUT, &["admin", "events", id], &[], Some(payload), Some(auth))
            .await
    }

    async fn delete_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        self.execute(Method::DELETE, &["admin", "events", id], &[], NO_BODY, Some(auth))
            .await
    }

    async fn publish_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &["admin", "events", id, "publish"],
            &[],
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn unpublish_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &["admin", "events", id, "unpublish"],
            &[],
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn list_project_contacts(
        &self,
        auth: &BasicAuth,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<ProjectContactItem>> {
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let list: ProjectContactList = self
            .fetch(
                Method::GET,
                &["admin", "contacts", "projects"],
                &query,
                NO_BODY,
                Some(auth),
            )
            .await?;
        Ok(list.items)
    }

    async fn project_contact_stats(&self, auth: &BasicAuth) -> ApiResult<ProjectContactStats> {
        self.fetch(
            Method::GET,
            &["admin", "contacts", "projects", "stats"],
            &[],
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn mark_project_contact_read(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &["admin", "contacts", "projects", id, "read"],
            &[],
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn upsert_schedule_day(&self, auth: &BasicAuth, day: &ScheduleDay) -> ApiResult<()> {
        let mut query = vec![("date", day.date.clone())];
        if let Some(open) = day.open {
            query.push(("open", open.to_string()));
        }
        if let Some(note) = day.note.as_deref().filter(|note| !note.is_empty()) {
            query.push(("note", note.to_string()));
        }
        self.execute(
            Method::POST,
            &["admin", "schedule", "day"],
            &query,
            NO_BODY,
            Some(auth),
        )
        .await
    }

    async fn add_service_window(&self, auth: &BasicAuth, window: &ServiceWindow) -> ApiResult<()> {
        let query = [
            ("date", window.date.clone()),
            ("start", window.start.clone()),
            ("end", window.end.clone()),
        ];
        self.execute(
            Method::POST,
            &["admin", "schedule", "window"],
            &query,
            NO_BODY,
            Some(auth),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// `admin:s3cret` en Basic
    const ADMIN_HEADER: &str = "Basic YWRtaW46czNjcmV0";

    fn admin() -> BasicAuth {
        BasicAuth::new("admin", "s3cret")
    }

    async fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&server.uri()).unwrap()
    }

    #[test]
    fn segments_are_percent_encoded() {
        let client = BackendClient::new("http://backend.local/").unwrap();
        let url = client.url(&["admin", "config", "mail contacto/x"]).unwrap();
        assert_eq!(url.as_str(), "http://backend.local/admin/config/mail%20contacto%2Fx");
    }

    #[test]
    fn base_path_is_preserved() {
        let client = BackendClient::new("http://backend.local/prefix").unwrap();
        let url = client.url(&["api", "v1", "menu"]).unwrap();
        assert_eq!(url.path(), "/prefix/api/v1/menu");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = decode::<MenuResponse>("/api/v1/menu", r#"{"food": 3}"#).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));
    }

    #[test]
    fn debug_never_prints_password() {
        let auth = BasicAuth::new("admin", "s3cret");
        assert!(!format!("{:?}", auth).contains("s3cret"));
    }

    #[tokio::test]
    async fn no_content_is_ok_for_commands() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/events/e1/publish"))
            .and(header("authorization", ADMIN_HEADER))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.publish_event(&admin(), "e1").await.is_ok());
    }

    #[tokio::test]
    async fn non_json_body_is_an_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/menu"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_menu().await.unwrap_err();
        assert!(matches!(err, ApiError::EmptyResponse { .. }));
        assert_eq!(err.to_string(), "Respuesta vacía en '/api/v1/menu'");
    }

    #[tokio::test]
    async fn empty_json_body_reads_as_null_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedule"))
            .and(query_param("from_", "2025-03-01"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let schedule = client.get_schedule(Some("2025-03-01"), None).await.unwrap();
        assert_eq!(schedule, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn error_status_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/config"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad creds"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.list_config(&admin()).await.unwrap_err();
        assert_eq!(err.http_status(), Some(401));
        assert_eq!(err.to_string(), "Bad creds");
    }

    #[tokio::test]
    async fn error_status_without_body_uses_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/events"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_events().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn admin_calls_send_basic_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/config"))
            .and(header("authorization", ADMIN_HEADER))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "key": "horario", "value": "X" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let entries = client.list_config(&admin()).await.unwrap();
        assert_eq!(
            entries,
            vec![ConfigEntry {
                key: "horario".into(),
                value: "X".into(),
            }]
        );
    }

    #[tokio::test]
    async fn availability_sends_party_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/availability"))
            .and(query_param("date", "2025-03-08"))
            .and(query_param("partySize", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "date": "2025-03-08",
                "partySize": 4,
                "slots": [{ "time": "20:00", "available": true }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let availability = client.get_availability("2025-03-08", 4).await.unwrap();
        assert_eq!(availability.slots.len(), 1);
        assert_eq!(availability.slots[0].time, "20:00");
    }

    #[tokio::test]
    async fn project_contacts_are_paged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/contacts/projects"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .and(header("authorization", ADMIN_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let items = client.list_project_contacts(&admin(), 100, 0).await.unwrap();
        assert!(items.is_empty());
    }
}

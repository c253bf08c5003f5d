//! # Páginas
//!
//! Cualquier ruta que no sea de la API devuelve el mismo documento base con
//! la sección resuelta en `data-section`. Las rutas desconocidas son portada,
//! nunca 404.

use actix_web::{get, http::header::ContentType, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::router::{path_to_section, section_to_path, Section};

fn title(section: Section) -> &'static str {
    match section {
        Section::Home => "Ariala",
        Section::Events => "Axenda · Ariala",
        Section::Menu => "Carta · Ariala",
        Section::Reservations => "Reservas · Ariala",
        Section::Projects => "Proxectos · Ariala",
        Section::Careers => "Traballa connosco · Ariala",
        Section::Cmr => "Xestión · Ariala",
        Section::Legal => "Aviso legal · Ariala",
        Section::Privacy => "Privacidade · Ariala",
        Section::Cookies => "Cookies · Ariala",
    }
}

/// Documento base de la página única
pub fn shell_html(section: Section) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="gl">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="canonical" href="{path}">
<link rel="stylesheet" href="/static/site.css">
</head>
<body data-section="{section}">
<div id="root"></div>
<script type="module" src="/static/site.js"></script>
</body>
</html>
"#,
        title = title(section),
        path = section_to_path(section),
        section = section,
    )
}

async fn shell(req: HttpRequest) -> impl Responder {
    let section = path_to_section(req.path());
    tracing::debug!(path = %req.path(), section = %section, "Página");
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(shell_html(section))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
    cfg.default_service(web::to(shell));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    async fn body_of(path: &str) -> (StatusCode, String) {
        let app = test::init_service(App::new().configure(routes)).await;
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn known_paths_render_their_section() {
        let (status, body) = body_of("/carta").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-section="menu""#));

        let (_, body) = body_of("/traballa").await;
        assert!(body.contains(r#"data-section="careers""#));
        assert!(body.contains(r#"href="/equipo""#));
    }

    #[actix_web::test]
    async fn unknown_paths_are_home() {
        let (status, body) = body_of("/non-existe").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-section="home""#));
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app = test::init_service(App::new().configure(routes)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }
}

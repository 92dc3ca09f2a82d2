//! Public pages and application submission against a real database.

mod common;

use axum::http::StatusCode;
use common::{
    body_text, create_program, create_test_pool, get, lock_db, new_program, open_program, send,
    test_app, unique, MultipartBody,
};
use domain::models::{ApplicationFilter, ApplicationStatus};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use persistence::repositories::ApplicationRepository;
use serde_json::json;

async fn applications_named(pool: &sqlx::PgPool, name: &str) -> Vec<domain::models::ApplicationListItem> {
    ApplicationRepository::new(pool.clone())
        .list_filtered(&ApplicationFilter {
            name_contains: Some(name.to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
}

fn common_fields(body: MultipartBody, name: &str) -> MultipartBody {
    let email: String = SafeEmail().fake();
    body.text("nome", name)
        .text("email", &email)
        .text("telefone", "11 98888-7777")
        .text("estado", "sp")
}

#[tokio::test]
async fn test_index_lists_active_programs_only() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;

    let visible = create_program(&pool, new_program(&unique("visivel"))).await;
    let mut hidden = new_program(&unique("oculto"));
    hidden.active = false;
    let hidden = create_program(&pool, hidden).await;

    let response = send(&app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(&format!("/programa/{}", visible.slug)));
    assert!(!page.contains(&format!("/programa/{}", hidden.slug)));

    let response = send(&app, get(&format!("/programa/{}", hidden.slug), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/programa/nao-existe", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submission_outside_window_is_rejected() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;

    let mut closed = new_program(&unique("encerrado"));
    closed.close_date = Some(common::yesterday());
    let closed = create_program(&pool, closed).await;
    let name = unique("Fora da Janela");

    let request = common_fields(MultipartBody::new(), &name)
        .into_request(&format!("/inscricao/{}", closed.slug));
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), format!("/programa/{}", closed.slug));
    assert!(applications_named(&pool, &name).await.is_empty());

    // The warning is shown on the program page.
    let cookie = common::session_cookie(&response).expect("flash cookie");
    let response = send(&app, get(&format!("/programa/{}", closed.slug), Some(&cookie))).await;
    let page = body_text(response).await;
    assert!(page.contains("Inscrições encerradas para este programa."));
    assert!(!page.contains(&format!("/inscricao/{}", closed.slug)));

    // The form itself is not served either.
    let response = send(&app, get(&format!("/inscricao/{}", closed.slug), None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_esports_submission_is_stored_pending() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;
    let program = open_program(&pool, "e-sports").await;
    let name = unique("Jogadora");

    let request = common_fields(MultipartBody::new(), &name)
        .text("idade", "17")
        .text("cidade", "São Paulo")
        .text("nickname", " foo ")
        .text("plataforma", "PC")
        .text("experiencia", "2 years")
        .into_request("/inscricao/e-sports");
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/programa/e-sports");

    let items = applications_named(&pool, &name).await;
    assert_eq!(items.len(), 1);
    let application = ApplicationRepository::new(pool.clone())
        .find_by_id(items[0].id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(application.program_id, program.id);
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.region_code, "SP");
    assert!(application.photo_filename.is_none());
    assert_eq!(
        serde_json::Value::Object(application.attributes),
        json!({
            "idade": "17",
            "cidade": "São Paulo",
            "nickname": "foo",
            "plataforma": "PC",
            "experiencia": "2 years",
        })
    );

    let cookie = common::session_cookie(&response).expect("flash cookie");
    let response = send(&app, get("/programa/e-sports", Some(&cookie))).await;
    assert!(body_text(response).await.contains("Inscrição realizada com sucesso!"));
}

#[tokio::test]
async fn test_overlong_phone_rerenders_form() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;
    open_program(&pool, "e-sports").await;
    let name = unique("Telefone Longo");
    let email: String = SafeEmail().fake();
    let phone = "1".repeat(60);

    let request = MultipartBody::new()
        .text("nome", &name)
        .text("email", &email)
        .text("telefone", &phone)
        .text("estado", "sp")
        .into_request("/inscricao/e-sports");
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Telefone deve ter no máximo 50 caracteres."));
    assert!(page.contains(&name), "form should be refilled");
    assert!(applications_named(&pool, &name).await.is_empty());
}

fn kart_fields(body: MultipartBody) -> MultipartBody {
    body.text("data_nascimento", "2011-05-20")
        .text("tem_condicoes_logistica", "sim")
        .text("categoria", "Cadete")
        .text("vestuario", "M")
        .text("vestuario", "G")
        .text("autorizacao_responsavel", "on")
}

#[tokio::test]
async fn test_kart_without_photo_is_not_persisted() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;
    open_program(&pool, "kart").await;
    let name = unique("Piloto Sem Foto");

    let request = kart_fields(common_fields(MultipartBody::new(), &name))
        // An untouched file input arrives with an empty filename.
        .file("foto", "", b"")
        .into_request("/inscricao/kart");
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Foto é obrigatória."));
    assert!(page.contains(&name), "form should be refilled");
    assert!(applications_named(&pool, &name).await.is_empty());
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_kart_with_photo_stores_file() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;
    open_program(&pool, "kart").await;
    let name = unique("Piloto");

    let request = kart_fields(common_fields(MultipartBody::new(), &name))
        .file("foto", "minha foto.JPG", b"jpeg-bytes")
        .into_request("/inscricao/kart");
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let items = applications_named(&pool, &name).await;
    assert_eq!(items.len(), 1);
    let application = ApplicationRepository::new(pool.clone())
        .find_by_id(items[0].id)
        .await
        .unwrap()
        .unwrap();

    let stored = application.photo_filename.expect("photo filename");
    assert!(stored.ends_with("_minha_foto.JPG"), "{}", stored);
    assert_eq!(std::fs::read(uploads.path().join(&stored)).unwrap(), b"jpeg-bytes");
    assert_eq!(application.attributes["vestuario"], json!(["M", "G"]));
    assert_eq!(application.attributes["autorizacao_responsavel"], json!(true));
}

#[tokio::test]
async fn test_internship_rejects_non_pdf_resume() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app(pool.clone(), uploads.path()).await;
    open_program(&pool, "estagio-motorsport").await;
    let name = unique("Estagiaria");

    let request = common_fields(MultipartBody::new(), &name)
        .text("concordo_compartilhamento", "on")
        .file("foto", "foto.png", b"png")
        .file("curriculo", "cv.docx", b"doc")
        .into_request("/inscricao/estagio-motorsport");
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("O currículo deve ser um arquivo PDF."));
    assert!(applications_named(&pool, &name).await.is_empty());
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_program_repository_round_trip() {
    let Some(pool) = create_test_pool().await else { return };
    let _guard = lock_db().await;
    let repo = persistence::repositories::ProgramRepository::new(pool.clone());

    let slug = unique("ida-e-volta");
    let created = create_program(&pool, new_program(&slug)).await;
    let found = repo.find_by_slug(&slug).await.unwrap().expect("program by slug");
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, format!("Programa {}", slug));
    assert_eq!(found.short_description.as_deref(), Some("Programa de teste"));

    // Seeding again never duplicates a slug.
    assert!(!repo.create_if_missing(&new_program(&slug)).await.unwrap());
}

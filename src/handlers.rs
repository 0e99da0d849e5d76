use actix_web::http::header::{ContentType, CACHE_CONTROL, LOCATION};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

use crate::api_client::ApiClient;
use crate::error::{PageError, Resolved};
use crate::models::Category;
use crate::nav::{MenuState, Navigation};
use crate::state::AppState;
use crate::views;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Turns the raw last path segment into the category name it encodes.
pub fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Splits the `answers` query value into option indices. Missing or blank
/// means no answers; every token must be an integer. Range is not checked.
pub fn parse_answers(raw: Option<&str>) -> Result<Vec<i64>, std::num::ParseIntError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(csv) => csv.split(',').map(|token| token.trim().parse()).collect(),
    }
}

fn query_pairs(req: &HttpRequest) -> Vec<(String, String)> {
    form_urlencoded::parse(req.query_string().as_bytes())
        .into_owned()
        .collect()
}

async fn resolve_categories(api: &ApiClient) -> Resolved<Vec<Category>> {
    let names = api.categories().await?;
    Ok(names.into_iter().map(Category::from_name).collect())
}

fn header_html(data: &AppState, req: &HttpRequest, categories: Option<&[Category]>) -> String {
    let query = query_pairs(req);
    let navigation = Navigation {
        categories: categories.unwrap_or_default(),
        state: MenuState::from_query(&query),
        path: req.path(),
        query: &query,
        brand: data.config.variant.brand(),
        route_prefix: data.config.variant.route_prefix(),
        breakpoint_px: data.config.nav_breakpoint_px,
    };
    navigation.render()
}

/// Categories for the navigation of pages other than the overview. A failure
/// only costs the navigation its links.
async fn navigation_categories(data: &AppState, req: &HttpRequest) -> Option<Vec<Category>> {
    match resolve_categories(&data.api).await {
        Ok(categories) => Some(categories),
        Err(e) => {
            log::error!("Navigation unavailable on {}: {}", req.path(), e);
            None
        }
    }
}

/// Renders a resolved page. A page shows at most one error panel: in the
/// body when the body failed, otherwise under the header when only the
/// navigation failed.
fn render_page(
    data: &AppState,
    req: &HttpRequest,
    title: &str,
    categories: Option<&[Category]>,
    body: Resolved<String>,
) -> HttpResponse {
    let brand = data.config.variant.brand();
    let header = header_html(data, req, categories);
    let (status, html) = match body {
        Ok(body) => {
            let header = match categories {
                Some(_) => header,
                None => format!("{}{}", header, views::error_panel()),
            };
            (StatusCode::OK, views::layout(brand, title, &header, &body))
        }
        Err(e) => {
            log::error!("Failed to resolve {}: {}", req.path(), e);
            (
                StatusCode::BAD_GATEWAY,
                views::layout(brand, "Error", &header, views::error_panel()),
            )
        }
    };

    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(html)
}

pub async fn categories_page(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    match resolve_categories(&data.api).await {
        Ok(categories) => {
            let body = views::category_grid(
                data.config.variant.brand(),
                &categories,
                data.config.variant.route_prefix(),
            );
            render_page(&data, &req, "Categories", Some(&categories), Ok(body))
        }
        Err(e) => render_page(&data, &req, "Categories", None, Err(e)),
    }
}

pub async fn quizzes_by_category(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let raw = req.uri().path().rsplit('/').next().unwrap_or_default();
    let category = decode_segment(raw);

    let categories = navigation_categories(&data, &req).await;
    let body: Resolved<String> = match data.api.quizzes_in(&category).await {
        Ok(quizzes) => Ok(views::quiz_grid(&category, &quizzes)),
        Err(e) => Err(e.into()),
    };

    let title = format!("{} Quizzes", category);
    render_page(&data, &req, &title, categories.as_deref(), body)
}

async fn resolve_results(api: &ApiClient, id: &str, answers: Option<&str>) -> Resolved<String> {
    let quiz = api.quiz_questions(id).await?;
    let answers = parse_answers(answers)?;
    Ok(views::quiz_results(id, quiz.questions(), &answers))
}

pub async fn quiz_results(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let quiz_id = path.into_inner();
    let query = query_pairs(&req);
    let answers = query
        .iter()
        .find(|(k, _)| k == "answers")
        .map(|(_, v)| v.as_str());

    let categories = navigation_categories(&data, &req).await;
    let body = resolve_results(&data.api, &quiz_id, answers).await;

    render_page(&data, &req, "Quiz Results", categories.as_deref(), body)
}

pub async fn quiz_page(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let quiz_id = path.into_inner();

    let categories = navigation_categories(&data, &req).await;
    let quiz = data.api.quiz_questions(&quiz_id).await.map_err(PageError::from);
    let title = quiz
        .as_ref()
        .ok()
        .and_then(|q| q.name())
        .unwrap_or("Quiz")
        .to_string();
    let body = quiz.map(|q| views::quiz_form(&quiz_id, q.name(), q.questions()));

    render_page(&data, &req, &title, categories.as_deref(), body)
}

/// Collects the play form's `q0..qN` radio values, in index order, into the
/// `answers` list the results page reads.
pub fn collect_answers(pairs: &[(String, String)]) -> Vec<String> {
    let mut answers = Vec::new();
    loop {
        let key = format!("q{}", answers.len());
        match pairs.iter().find(|(k, _)| *k == key) {
            Some((_, v)) => answers.push(v.clone()),
            None => break,
        }
    }
    answers
}

pub async fn submit_answers(req: HttpRequest, path: web::Path<String>) -> impl Responder {
    let quiz_id = path.into_inner();
    let quiz_path = views::quiz_href(&quiz_id);
    let answers = collect_answers(&query_pairs(&req));

    let location = if answers.is_empty() {
        quiz_path
    } else {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("answers", &answers.join(","))
            .finish();
        format!("{}/results?{}", quiz_path, query)
    };

    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

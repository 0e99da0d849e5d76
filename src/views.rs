//! Presentation only: every function here maps already-fetched data to HTML.

use percent_encoding::utf8_percent_encode;

use crate::api_client::SEGMENT;
use crate::models::{Category, Question, Quiz};
use crate::nav::category_href;

const FALLBACK_QUIZ_IMAGE: &str = "/images/vegan.png";

/// Path of a quiz's play page, with the id kept to one segment.
pub fn quiz_href(quiz_id: &str) -> String {
    format!("/quiz/{}", utf8_percent_encode(quiz_id, SEGMENT))
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(brand: &str, title: &str, header: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{} | {}</title><link rel=\"icon\" href=\"/favicon.ico\"></head>\
         <body><div class=\"container\">{}<main>{}</main></div></body></html>",
        escape(title),
        escape(brand),
        header,
        body
    )
}

pub const ERROR_PANEL: &str = "<div class=\"error-panel\" role=\"alert\">\
    <h2>Something went wrong</h2>\
    <p>This page could not be loaded. Please try again.</p></div>";

/// The single failure rendering shared by every page.
pub fn error_panel() -> &'static str {
    ERROR_PANEL
}

pub fn category_grid(brand: &str, categories: &[Category], route_prefix: &str) -> String {
    let mut html = format!(
        "<section class=\"categories\"><h1>Welcome to {}</h1><h2>Choose a category to get started</h2><div class=\"grid\">",
        escape(brand)
    );
    for category in categories {
        html.push_str(&format!(
            "<a class=\"category-card\" href=\"{}\"><img src=\"{}\" alt=\"{}\"><h3>{}</h3></a>",
            escape(&category_href(route_prefix, &category.name)),
            escape(&category.image),
            escape(&category.name),
            escape(&category.name)
        ));
    }
    html.push_str("</div></section>");
    html
}

pub fn quiz_grid(category: &str, quizzes: &[Quiz]) -> String {
    let mut html = format!(
        "<section class=\"quizzes\"><h1 class=\"category-title\">{} Quizzes</h1>",
        escape(category)
    );

    if quizzes.is_empty() {
        html.push_str(&format!(
            "<p class=\"empty-state\">No quizzes available for {} yet.</p></section>",
            escape(category)
        ));
        return html;
    }

    html.push_str("<div class=\"grid\">");
    for quiz in quizzes {
        html.push_str(&quiz_card(quiz));
    }
    html.push_str("</div></section>");
    html
}

fn quiz_card(quiz: &Quiz) -> String {
    let image = if quiz.image.is_empty() {
        FALLBACK_QUIZ_IMAGE
    } else {
        quiz.image.as_str()
    };

    let mut card = format!(
        "<div class=\"quiz-card\"><img src=\"{}\" alt=\"{}\"><h2>{}</h2>",
        escape(image),
        escape(&quiz.name),
        escape(&quiz.name)
    );
    if !quiz.description.is_empty() {
        card.push_str(&format!("<p>{}</p>", escape(&quiz.description)));
    }
    if !quiz.difficulty.is_empty() {
        card.push_str(&format!(
            "<span class=\"difficulty\">{}</span>",
            escape(&quiz.difficulty)
        ));
    }
    card.push_str(&format!(
        "<a class=\"start-quiz\" href=\"/quiz/{}\">Start Quiz!</a></div>",
        quiz.id
    ));
    card
}

pub fn quiz_form(quiz_id: &str, title: Option<&str>, questions: &[Question]) -> String {
    let mut html = format!(
        "<section class=\"quiz\"><h1>{}</h1><form method=\"get\" action=\"{}/submit\">",
        escape(title.unwrap_or("Quiz")),
        escape(&quiz_href(quiz_id))
    );

    for (i, question) in questions.iter().enumerate() {
        html.push_str(&format!(
            "<fieldset class=\"question\"><legend>{}. {}</legend>",
            i + 1,
            escape(&question.question)
        ));
        for (j, option) in question.options.iter().enumerate() {
            html.push_str(&format!(
                "<label><input type=\"radio\" name=\"q{}\" value=\"{}\" required> {}</label>",
                i,
                j,
                escape(option)
            ));
        }
        html.push_str("</fieldset>");
    }

    html.push_str("<button type=\"submit\">See results</button></form></section>");
    html
}

/// Option index a raw answer points at; negative answers point nowhere.
fn chosen_index(answer: i64) -> Option<usize> {
    usize::try_from(answer).ok()
}

pub fn score(questions: &[Question], answers: &[i64]) -> usize {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| chosen_index(**a) == Some(q.correct_answer))
        .count()
}

pub fn quiz_results(quiz_id: &str, questions: &[Question], answers: &[i64]) -> String {
    let mut html = format!(
        "<section class=\"results\"><h1>Quiz Results</h1><p class=\"score\">You scored {} out of {}</p><ol>",
        score(questions, answers),
        questions.len()
    );

    for (i, question) in questions.iter().enumerate() {
        let chosen = answers.get(i).copied().and_then(chosen_index);
        let correct = chosen == Some(question.correct_answer);
        let chosen_text = chosen
            .and_then(|a| question.options.get(a))
            .map(|o| escape(o))
            .unwrap_or_else(|| "No answer".to_string());
        let correct_text = question
            .options
            .get(question.correct_answer)
            .map(|o| escape(o))
            .unwrap_or_default();

        html.push_str(&format!(
            "<li class=\"{}\"><h3>{}</h3><p>Your answer: {}</p><p>Correct answer: {}</p>",
            if correct { "correct" } else { "incorrect" },
            escape(&question.question),
            chosen_text,
            correct_text
        ));
        if let Some(explanation) = &question.explanation {
            html.push_str(&format!(
                "<p class=\"explanation\">{}</p>",
                escape(explanation)
            ));
        }
        html.push_str("</li>");
    }

    html.push_str(&format!(
        "</ol><a href=\"{}\">Retake quiz</a> <a href=\"/\">Back to categories</a></section>",
        escape(&quiz_href(quiz_id))
    ));
    html
}

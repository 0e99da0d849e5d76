use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub image: String,
}

impl Category {
    /// Builds a category from the bare name the backend lists; the image
    /// path is fixed by convention.
    pub fn from_name(name: String) -> Self {
        let image = format!("/images/{}.jpg", name);
        Category { name, image }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Question {
    #[serde(alias = "text")]
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "answer")]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Question set for one quiz. The backend sends either a bare list of
/// questions or an object wrapping it.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuizQuestions {
    Bare(Vec<Question>),
    Wrapped {
        #[serde(default)]
        name: Option<String>,
        questions: Vec<Question>,
    },
}

impl QuizQuestions {
    pub fn name(&self) -> Option<&str> {
        match self {
            QuizQuestions::Bare(_) => None,
            QuizQuestions::Wrapped { name, .. } => name.as_deref(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        match self {
            QuizQuestions::Bare(questions) => questions,
            QuizQuestions::Wrapped { questions, .. } => questions,
        }
    }
}

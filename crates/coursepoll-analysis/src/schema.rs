//! Fixed layout of the online-education survey export
//!
//! The export has one respondent-identifier column (a timestamp) followed by
//! 19 question columns in a fixed order. Each [`Question`] carries a stable
//! ASCII key used for output file names, a display title, and a
//! [`QuestionKind`] that decides how its answers are charted.

use self::QuestionKind::{FreeText, MultiChoice, PlatformOpinion, SingleChoice};

/// Semantic type of a question column
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum QuestionKind {
    /// One categorical answer per respondent
    SingleChoice,
    /// Free-form text answer
    FreeText,
    /// Semicolon-delimited list of choices, optionally with parenthetical qualifiers
    MultiChoice,
    /// Opinion about one platform, drawn from the opinion scale
    PlatformOpinion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: QuestionKind,
}

impl Question {
    const fn new(key: &'static str, title: &'static str, kind: QuestionKind) -> Self {
        Self { key, title, kind }
    }
}

/// Number of question columns
pub const QUESTION_COUNT: usize = 19;

/// Question columns in file order (the identifier column excluded)
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question::new("gender", "Пол", SingleChoice),
    Question::new("education", "Образование", SingleChoice),
    Question::new("settlement", "Тип населенного пункта", SingleChoice),
    Question::new("online_experience", "Опыт онлайн-обучения", SingleChoice),
    Question::new("platform_coursera", "Coursera", PlatformOpinion),
    Question::new("platform_stepik", "Stepik", PlatformOpinion),
    Question::new("platform_edx", "Edx", PlatformOpinion),
    Question::new("platform_geekbrains", "GeekBrains", PlatformOpinion),
    Question::new("platform_udacity", "Udacity", PlatformOpinion),
    Question::new("platform_udemy", "Udemy", PlatformOpinion),
    Question::new("platform_openedu", "Открытое образование", PlatformOpinion),
    Question::new("platform_foxford", "Фоксфорд", PlatformOpinion),
    Question::new("key_criterion", "Важнейший критерий", SingleChoice),
    Question::new("best_subjects", "Лучшие предметы", MultiChoice),
    Question::new("material_format", "Форма материалов", SingleChoice),
    Question::new("deadlines", "Отношение к дедлайнам", SingleChoice),
    Question::new("dropout_reasons", "Из-за чего люди бросают курсы", FreeText),
    Question::new(
        "certificates",
        "Смотрят ли работодатели на сертификаты",
        SingleChoice,
    ),
    Question::new(
        "replace_offline",
        "Сможет ли заменить очное образование",
        SingleChoice,
    ),
];

/// Number of leading non-question columns
pub const IDENTIFIER_COLUMNS: usize = 1;

/// Total number of columns in a well-formed export
pub const EXPECTED_COLUMNS: usize = IDENTIFIER_COLUMNS + QUESTION_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display(
        "missing column {column} for question '{key}' (expected {} columns, found {found})",
        EXPECTED_COLUMNS
    )]
    MissingColumn {
        column: usize,
        key: &'static str,
        found: usize,
    },
    #[display(
        "unexpected columns (expected {} columns, found {found})",
        EXPECTED_COLUMNS
    )]
    UnexpectedColumns { found: usize },
    #[display("survey contains no respondents")]
    NoRespondents,
}

/// A question bound to its column in a loaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn<'a> {
    pub question: &'static Question,
    /// Zero-based index of the column in the file
    pub column: usize,
    /// Header text of the column as found in the file
    pub header: &'a str,
}

/// Binds every question of [`QUESTIONS`] to its column in `headers`.
///
/// The header row must have exactly [`EXPECTED_COLUMNS`] columns. Platform-opinion
/// columns whose header does not mention the platform name are accepted with a
/// warning.
pub fn resolve_columns(headers: &[String]) -> Result<Vec<ResolvedColumn<'_>>, SchemaError> {
    let found = headers.len();
    if found < EXPECTED_COLUMNS {
        let missing = found.saturating_sub(IDENTIFIER_COLUMNS);
        return Err(SchemaError::MissingColumn {
            column: missing + IDENTIFIER_COLUMNS,
            key: QUESTIONS[missing].key,
            found,
        });
    }
    if found > EXPECTED_COLUMNS {
        return Err(SchemaError::UnexpectedColumns { found });
    }

    let columns = QUESTIONS
        .iter()
        .zip(&headers[IDENTIFIER_COLUMNS..])
        .enumerate()
        .map(|(idx, (question, header))| {
            if question.kind.is_platform_opinion() && !mentions(header, question.title) {
                tracing::warn!(
                    key = question.key,
                    header = header.as_str(),
                    "platform column header does not mention '{}'",
                    question.title
                );
            }
            ResolvedColumn {
                question,
                column: idx + IDENTIFIER_COLUMNS,
                header: header.as_str(),
            }
        })
        .collect();
    Ok(columns)
}

fn mentions(header: &str, name: &str) -> bool {
    header.to_lowercase().contains(&name.to_lowercase())
}

/// Questions of the platform-opinion block, in file order
pub fn platform_questions() -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(|q| q.kind.is_platform_opinion())
}

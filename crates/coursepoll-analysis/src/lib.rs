//! Survey aggregation for the online-education poll
//!
//! This crate turns the raw survey export into charts and summaries:
//!
//! 1. **Load** ([`survey::Survey`]): read the comma-delimited export
//! 2. **Extract** ([`extract::SurveyAnswers`]): bind columns to the fixed
//!    [`schema::QUESTIONS`] and slice them into answer series, splitting
//!    multi-choice answers into individual choices
//! 3. **Score** ([`sentiment::OpinionScale`]): map platform opinions to ordinal
//!    scores and count positive opinions
//! 4. **Report** ([`report::Report`]): pick a chart type per question, build the
//!    platform charts, and hand everything to a
//!    [`ChartSink`](coursepoll_chart::ChartSink)
//!
//! # Examples
//!
//! ```no_run
//! use coursepoll_analysis::{
//!     extract::SurveyAnswers,
//!     report::{Report, ReportOptions},
//!     survey::Survey,
//! };
//! use coursepoll_chart::ImageRenderer;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let survey = Survey::from_path("online_courses.csv")?;
//! let answers = SurveyAnswers::extract(&survey)?;
//! let report = Report::build(&answers, &ReportOptions::default())?;
//!
//! let renderer = ImageRenderer::new("output")?;
//! report.render(renderer)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod report;
pub mod schema;
pub mod sentiment;
pub mod summary;
pub mod survey;

//! Statistical utilities for the coursepoll survey report.
//!
//! This crate provides the small set of statistical tools the report needs:
//!
//! - **Descriptive statistics**: mean, median, variance and standard deviation
//! - **Frequency tables**: occurrence counts for categorical answers
//! - **Linear regression**: ordinary least-squares line fits for trend overlays
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing numeric datasets
//! - [`frequency`]: Enumeration-free category counting
//! - [`regression`]: Simple univariate linear regression
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use coursepoll_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Counting categorical answers
//!
//! ```
//! use coursepoll_stats::frequency::FrequencyTable;
//!
//! let answers = ["yes", "no", "yes"];
//! let table = FrequencyTable::from_values(answers);
//! assert_eq!(table.get(&"yes"), 2);
//! assert_eq!(table.total(), 3);
//! ```
//!
//! ## Fitting a trend line
//!
//! ```
//! use coursepoll_stats::regression::LinearFit;
//!
//! let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
//! assert_eq!(fit.predict(3.0), 7.0);
//! ```

pub mod descriptive;
pub mod frequency;
pub mod regression;

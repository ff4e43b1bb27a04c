//! Whole-document tests for the vCard pipeline.

mod documents;

//! Label schemas for registry instruments.

use crate::{PromredError, Result};

/// Label names of a registry's counters and its histogram.
///
/// Both counters (operations and errors) share one list; the histogram may use
/// a narrower or wider list, as long as one contains the other. The HTTP
/// handler, for example, labels its counters with `status_code` but keeps it
/// off the histogram to limit cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSchema {
    counter: Vec<&'static str>,
    histogram: Vec<&'static str>,
}

impl LabelSchema {
    /// Same labels on every instrument.
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            counter: labels.to_vec(),
            histogram: labels.to_vec(),
        }
    }

    /// Use different labels on the histogram.
    pub fn histogram_labels(mut self, labels: &[&'static str]) -> Self {
        self.histogram = labels.to_vec();
        self
    }

    /// Labels of the operation and error counters.
    pub fn counter(&self) -> &[&'static str] {
        &self.counter
    }

    /// Labels of the duration histogram.
    pub fn histogram(&self) -> &[&'static str] {
        &self.histogram
    }

    /// Every label name a descriptor must carry: the wider of the two lists.
    pub fn descriptor_labels(&self) -> &[&'static str] {
        if self.counter.len() >= self.histogram.len() {
            &self.counter
        } else {
            &self.histogram
        }
    }

    /// Check names, uniqueness and that one list contains the other.
    pub fn validate(&self) -> Result<()> {
        for (instrument, labels) in [("counter", &self.counter), ("histogram", &self.histogram)] {
            if labels.is_empty() {
                return Err(PromredError::InvalidSchema(format!(
                    "{instrument} has no labels"
                )));
            }
            for (i, label) in labels.iter().enumerate() {
                if !is_valid_label_name(label) {
                    return Err(PromredError::InvalidSchema(format!(
                        "invalid label name '{label}' on {instrument}"
                    )));
                }
                if labels[..i].contains(label) {
                    return Err(PromredError::InvalidSchema(format!(
                        "duplicate label '{label}' on {instrument}"
                    )));
                }
            }
        }

        let (wide, narrow) = if self.counter.len() >= self.histogram.len() {
            (&self.counter, &self.histogram)
        } else {
            (&self.histogram, &self.counter)
        };
        if let Some(stray) = narrow.iter().find(|l| !wide.contains(*l)) {
            return Err(PromredError::InvalidSchema(format!(
                "label '{stray}' is not shared by counter [{}] and histogram [{}]",
                self.counter.join(", "),
                self.histogram.join(", ")
            )));
        }
        Ok(())
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, minus the reserved `__` prefix.
fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with("__")
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub(crate) fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

//! Mutation observation for the in-memory select element

/// Kind of change made to an observed element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// Children were added, removed or replaced
    ChildList,
    /// An observed attribute changed
    Attribute {
        /// Attribute name (`disabled` or `selected`)
        name: String,
        /// Value of the option whose attribute changed, `None` for the select itself
        option: Option<String>,
    },
}

impl MutationRecord {
    /// Attribute change on the select element itself
    #[must_use]
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            option: None,
        }
    }

    /// Attribute change on one of the select's options
    #[must_use]
    pub fn option_attribute(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            option: Some(option.into()),
        }
    }
}

/// Attributes whose changes are reported
pub const OBSERVED_ATTRIBUTES: [&str; 2] = ["disabled", "selected"];

/// Queue of mutation records with an on/off switch
///
/// Disconnecting only stops recording. Records queued before the switch was
/// flipped stay queued until someone takes them.
#[derive(Debug, Clone, Default)]
pub struct MutationObserver {
    connected: bool,
    records: Vec<MutationRecord>,
}

impl MutationObserver {
    /// Start recording
    pub const fn observe(&mut self) {
        self.connected = true;
    }

    /// Stop recording
    pub const fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Whether mutations are being recorded
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Queue a record if observing
    pub fn notify(&mut self, record: MutationRecord) {
        if !self.connected {
            return;
        }
        if matches!(&record, MutationRecord::Attribute { name, .. } if !OBSERVED_ATTRIBUTES.contains(&name.as_str())) {
            return;
        }
        self.records.push(record);
    }

    /// Drain queued records
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    /// Number of queued records
    #[must_use]
    pub fn pending(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_only_while_connected() {
        let mut observer = MutationObserver::default();
        observer.notify(MutationRecord::ChildList);
        assert_eq!(observer.pending(), 0);

        observer.observe();
        observer.notify(MutationRecord::ChildList);
        observer.disconnect();
        observer.notify(MutationRecord::attribute("disabled"));
        assert_eq!(observer.take_records(), vec![MutationRecord::ChildList]);
        assert_eq!(observer.pending(), 0);
    }

    #[test]
    fn test_unobserved_attributes_are_dropped() {
        let mut observer = MutationObserver::default();
        observer.observe();
        observer.notify(MutationRecord::attribute("style"));
        observer.notify(MutationRecord::option_attribute("selected", "1"));
        assert_eq!(observer.pending(), 1);
    }
}

//! Form field identifiers and focus order

/// Focusable fields of the lab request form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Patient,
    Appointment,
    LabType,
    Notes,
    /// The Save / Cancel button row
    Buttons,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Patient,
        FormField::Appointment,
        FormField::LabType,
        FormField::Notes,
        FormField::Buttons,
    ];

    /// Translation key of the field label
    pub fn label_key(&self) -> Option<&'static str> {
        match self {
            Self::Patient => Some("labs.lab.patient"),
            Self::Appointment => Some("labs.lab.appointments"),
            Self::LabType => Some("labs.lab.type"),
            Self::Notes => Some("labs.lab.notes"),
            Self::Buttons => None,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Patient | Self::LabType)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Notes)
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn is_visible(self, appointments_visible: bool) -> bool {
        self != Self::Appointment || appointments_visible
    }

    /// Next visible field (wraps around)
    pub fn next(self, appointments_visible: bool) -> Self {
        let len = Self::ORDER.len();
        let mut index = self.index();
        loop {
            index = (index + 1) % len;
            let candidate = Self::ORDER[index];
            if candidate.is_visible(appointments_visible) {
                return candidate;
            }
        }
    }

    /// Previous visible field (wraps around)
    pub fn prev(self, appointments_visible: bool) -> Self {
        let len = Self::ORDER.len();
        let mut index = self.index();
        loop {
            index = (index + len - 1) % len;
            let candidate = Self::ORDER[index];
            if candidate.is_visible(appointments_visible) {
                return candidate;
            }
        }
    }
}

/// Buttons of the action row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Save,
    Cancel,
}

impl FormButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Save => Self::Cancel,
            Self::Cancel => Self::Save,
        };
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Save => "actions.save",
            Self::Cancel => "actions.cancel",
        }
    }
}

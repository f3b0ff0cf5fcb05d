//! Row Descriptors
//!
//! The detail screen is a fixed sequence of five rows: four info rows and one
//! action row. The controller describes them as a closed enum and the TUI
//! layer decides how each kind looks.

/// The three editable fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    Website,
}

impl Field {
    /// Next field in tab order, `None` after the last one
    pub fn next(self) -> Option<Field> {
        match self {
            Self::Username => Some(Self::Password),
            Self::Password => Some(Self::Website),
            Self::Website => None,
        }
    }

    /// Input hint for the field's text capture
    pub fn hint(self) -> InputHint {
        match self {
            Self::Username => InputHint::Email,
            Self::Password => InputHint::Plain,
            Self::Website => InputHint::Url,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Website => "website",
        }
    }
}

/// Shape hint for text capture in an editable row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHint {
    Plain,
    Email,
    Url,
}

/// One row of the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Site identity, read-only even while editing
    Title { hostname: String },
    /// An editable credential field
    Input {
        field: Field,
        value: String,
        hint: InputHint,
        editing: bool,
        focused: bool,
    },
    /// Destructive action, handled by the host screen
    Delete,
}

/// Outcome of a submit signal on an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Focus moved to the next field; the default submit action must not run
    Handled(Field),
    /// The field relinquished focus entirely
    Released,
}

/// What a state change requires of the presentation layer.
///
/// Returned from every mutating controller call so re-rendering is an
/// explicit subscription rather than implicit property interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Only the metadata footer changed
    Footer,
    /// The info rows changed
    Rows,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order() {
        assert_eq!(Field::Username.next(), Some(Field::Password));
        assert_eq!(Field::Password.next(), Some(Field::Website));
        assert_eq!(Field::Website.next(), None);
    }

    #[test]
    fn test_input_hints() {
        assert_eq!(Field::Username.hint(), InputHint::Email);
        assert_eq!(Field::Password.hint(), InputHint::Plain);
        assert_eq!(Field::Website.hint(), InputHint::Url);
    }
}

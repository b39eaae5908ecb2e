//! Scoring Weight Tables
//!
//! Every numeric weight used by the scorers lives here, one constant per
//! field category, so the tables can be tuned and unit-tested without
//! touching scoring control flow.
//!
//! Each category is scored independently by its strongest matching rule
//! (exact > prefix > substring); the final candidate score is the maximum
//! across categories plus a small bonus for corroborating matches.

/// Sub-score weights for one field category. `None` means the rule does not
/// apply to that category.
#[derive(Debug, Clone, Copy)]
pub struct FieldWeights {
    pub exact: Option<u8>,
    pub prefix: Option<u8>,
    pub contains: Option<u8>,
}

impl FieldWeights {
    const fn new(exact: Option<u8>, prefix: Option<u8>, contains: Option<u8>) -> Self {
        Self {
            exact,
            prefix,
            contains,
        }
    }
}

/// Score ceiling; the multi-field bonus never pushes past it.
pub const MAX_SCORE: u8 = 100;

/// Bonus added per distinct matched category when two or more categories
/// matched.
pub const MULTI_FIELD_BONUS: u8 = 2;

/// Artisan field categories.
pub mod artisan {
    use super::FieldWeights;

    /// Associate code: the artisan's primary identity field.
    pub const CODE: FieldWeights = FieldWeights::new(Some(100), Some(85), None);
    /// Company name (raison sociale).
    pub const COMPANY: FieldWeights = FieldWeights::new(None, Some(75), Some(60));
    /// Full name, first + last.
    pub const NAME: FieldWeights = FieldWeights::new(None, Some(75), Some(60));
    /// Either phone field, digit-sanitized.
    pub const TELEPHONE: FieldWeights = FieldWeights::new(Some(70), Some(60), Some(60));
    /// Email; only consulted for queries longer than one character.
    pub const EMAIL: FieldWeights = FieldWeights::new(None, None, Some(65));
    /// Primary trade label.
    pub const METIER: FieldWeights = FieldWeights::new(None, Some(65), Some(55));
}

/// Intervention field categories.
pub mod intervention {
    use super::FieldWeights;

    /// External reference code: the intervention's primary identity field.
    pub const REFERENCE: FieldWeights = FieldWeights::new(Some(100), Some(90), Some(80));
    /// Primary assigned artisan's phone ("numero SST").
    pub const ARTISAN_PHONE: FieldWeights = FieldWeights::new(Some(85), Some(75), Some(65));
    /// Free-text context/description.
    pub const CONTEXTE: FieldWeights = FieldWeights::new(Some(85), Some(75), Some(65));
    /// Client/tenant phone; stronger disambiguator than the artisan phone
    /// for this entity type.
    pub const CLIENT_PHONE: FieldWeights = FieldWeights::new(Some(95), None, Some(70));
    /// Client/tenant full name.
    pub const CLIENT_NAME: FieldWeights = FieldWeights::new(Some(85), Some(75), Some(65));
    /// Street address.
    pub const ADDRESS: FieldWeights = FieldWeights::new(None, None, Some(60));
    /// City.
    pub const CITY: FieldWeights = FieldWeights::new(Some(70), Some(65), None);
    /// Postal code.
    pub const POSTAL: FieldWeights = FieldWeights::new(Some(80), None, None);
    /// Agent free-text comment.
    pub const COMMENTS: FieldWeights = FieldWeights::new(None, None, Some(50));
    /// Free-text instructions.
    pub const NOTES: FieldWeights = FieldWeights::new(None, None, Some(50));
    /// Assigned back-office user code or username.
    pub const ASSIGNED_USER: FieldWeights = FieldWeights::new(Some(80), Some(70), None);
    /// Primary assigned artisan's associate code.
    pub const ASSIGNED_ARTISAN_CODE: FieldWeights = FieldWeights::new(Some(80), Some(70), None);
    /// Primary assigned artisan's full name.
    pub const ASSIGNED_ARTISAN_NAME: FieldWeights = FieldWeights::new(Some(75), Some(65), Some(55));
    /// Trade label.
    pub const METIER: FieldWeights = FieldWeights::new(None, Some(65), None);
}

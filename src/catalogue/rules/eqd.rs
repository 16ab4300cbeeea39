//! Element quality data (EQD): `Q01..Q99`, `P`, `R`, `C`, `D`, `N`.
//!
//! Each prefix declares which parameter-code validator applies to part 3.

use crate::catalogue::{CatalogueBuilder, CrossPartRule, EqdValidator, FieldRule, PartRule};

const PREFIXES: &[(&str, &str, EqdValidator)] = &[
    ("Q", "Element quality data (original value)", EqdValidator::Legacy),
    ("P", "Element quality data (precipitation)", EqdValidator::Legacy),
    ("R", "Element quality data (MSD replacement)", EqdValidator::LegacyOrMsd),
    ("C", "Element quality data (climate)", EqdValidator::Legacy),
    ("D", "Element quality data (daily)", EqdValidator::Legacy),
    ("N", "Element quality data (element schema)", EqdValidator::ElementSchema),
];

pub(super) fn register(b: &mut CatalogueBuilder) {
    for &(prefix, description, validator) in PREFIXES {
        let no_codes: &[&str] = &[];
        b.template(
            FieldRule::new(prefix, description)
                .part(PartRule::free_text().named("eqd_{id}_original_value"))
                .part(
                    PartRule::categorical(1, &super::digits(0, 9))
                        .named("eqd_{id}_reason_code"),
                )
                .part(
                    PartRule::categorical(1, no_codes)
                        .unbounded_width()
                        .named("eqd_{id}_parameter_code"),
                )
                .cross(CrossPartRule::EqdParameter { part: 3, validator }),
        );
    }
}

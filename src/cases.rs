//! Canned lookup scenarios shared by the client's acceptance tests.

/// Outcome a canned lookup is expected to produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpectedOutcome {
    /// The lookup resolves to the given contact name.
    Success {
        /// Contact name the client should report.
        name: &'static str,
    },
    /// The lookup completes without finding a contact.
    Unknown,
    /// The number cannot be interpreted as a dialable number.
    InvalidNumber,
}

/// Parameters and expected outcome for one canned lookup call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LookupCase {
    /// Raw number as dialled.
    pub number: &'static str,
    /// ISO region supplied alongside the number, when any.
    pub region: Option<&'static str>,
    /// Dial-code hint supplied instead of a region, when any.
    pub region_dial_code: Option<&'static str>,
    /// Outcome the client is expected to produce.
    pub expected: ExpectedOutcome,
}

/// The canned scenarios exercised against every account fixture.
#[must_use]
pub const fn builtin_cases() -> [LookupCase; 4] {
    [
        LookupCase {
            number: "2024561111",
            region: Some("US"),
            region_dial_code: None,
            expected: ExpectedOutcome::Success {
                name: "White House",
            },
        },
        LookupCase {
            number: "+7 495 697-03-49",
            region: None,
            region_dial_code: None,
            expected: ExpectedOutcome::Success { name: "Kremlin" },
        },
        LookupCase {
            number: "(512) 555-6677",
            region: Some("US"),
            region_dial_code: None,
            expected: ExpectedOutcome::Unknown,
        },
        LookupCase {
            number: "12345",
            region: None,
            region_dial_code: Some("XX"),
            expected: ExpectedOutcome::InvalidNumber,
        },
    ]
}

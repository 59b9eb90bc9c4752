//! Resource kinds exposed by the clinic API

use std::fmt;

/// The three record collections managed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Patient,
    Doctor,
    MedicalVisit,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Patient,
        ResourceKind::Doctor,
        ResourceKind::MedicalVisit,
    ];

    /// Singular, lower-case name used in messages ("No patient found ...").
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
            ResourceKind::Doctor => "doctor",
            ResourceKind::MedicalVisit => "medical visit",
        }
    }

    /// Plural name used in messages and metric labels.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patients",
            ResourceKind::Doctor => "doctors",
            ResourceKind::MedicalVisit => "medical visits",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

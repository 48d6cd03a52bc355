//! Option catalogs for the stack configuration step.
//!
//! Options flagged as coming soon are rendered disabled rather than hidden,
//! and every session operation targeting them is ignored.

/// Target language for the generated backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    TypeScript,
    Python,
    Go,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::TypeScript, Language::Python, Language::Go]
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Go => "Go",
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Language::TypeScript)
    }
}

/// Target database for the generated backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Database {
    #[default]
    Supabase,
    Postgres,
    MongoDb,
}

impl Database {
    pub fn all() -> &'static [Database] {
        &[Database::Supabase, Database::Postgres, Database::MongoDb]
    }

    pub fn label(self) -> &'static str {
        match self {
            Database::Supabase => "Supabase",
            Database::Postgres => "PostgreSQL",
            Database::MongoDb => "MongoDB",
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Database::Supabase)
    }
}

/// A selectable project feature. Unavailable features are shown but inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub id: &'static str,
    pub label: &'static str,
    pub available: bool,
}

/// The fixed feature catalog offered on the stack configuration step.
pub const FEATURES: &[Feature] = &[
    Feature {
        id: "auth",
        label: "Authentication & Sessions",
        available: true,
    },
    Feature {
        id: "crud",
        label: "CRUD Endpoints",
        available: true,
    },
    Feature {
        id: "swagger",
        label: "Auto-generated Swagger Docs",
        available: true,
    },
    Feature {
        id: "docker",
        label: "Docker Configuration",
        available: true,
    },
    Feature {
        id: "cicd",
        label: "CI/CD Pipelines",
        available: false,
    },
    Feature {
        id: "realtime",
        label: "Realtime Subscriptions",
        available: false,
    },
];

/// Look up a feature by id.
pub fn feature(id: &str) -> Option<&'static Feature> {
    FEATURES.iter().find(|f| f.id == id)
}

//! Static site data consulted at render time.

use std::fmt;

/// Labels cycled by the hero typing animation, in display order.
pub const ROLES: [&str; 6] = [
    "Software Engineer",
    "System Architect",
    "Cloud Specialist",
    "Automation Engineer",
    "Full-Stack Builder",
    "Problem Solver",
];

/// RGB accent colour for a service card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accent {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Accent {
    pub const ELECTRIC: Accent = Accent::rgb(0x00, 0xd4, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbbaa` form used for translucent borders and labels.
    pub fn tint(self, alpha: u8) -> String {
        format!("{self}{alpha:02x}")
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAccent {
    pub title: &'static str,
    pub accent: Accent,
}

pub const SERVICE_ACCENTS: [ServiceAccent; 6] = [
    ServiceAccent {
        title: "Full-Stack Architecture",
        accent: Accent::ELECTRIC,
    },
    ServiceAccent {
        title: "Cloud & VPS Infrastructure",
        accent: Accent::rgb(0x00, 0x99, 0xff),
    },
    ServiceAccent {
        title: "Workflow Automation",
        accent: Accent::rgb(0x00, 0xcc, 0xaa),
    },
    ServiceAccent {
        title: "Offline-First Mobile Apps",
        accent: Accent::rgb(0x66, 0x33, 0xff),
    },
    ServiceAccent {
        title: "School Management Systems",
        accent: Accent::rgb(0xff, 0x66, 0x00),
    },
    ServiceAccent {
        title: "DevOps & Security",
        accent: Accent::rgb(0xff, 0x33, 0x66),
    },
];

/// Accent for a service title; unknown titles get [`Accent::ELECTRIC`].
pub fn accent_for(title: &str) -> Accent {
    SERVICE_ACCENTS
        .iter()
        .find(|entry| entry.title.eq_ignore_ascii_case(title))
        .map(|entry| entry.accent)
        .unwrap_or(Accent::ELECTRIC)
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

use super::templates::*;

/// Which of the two report families a session works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Crime scene imagery (FotoCrime reports)
    Forensic,
    /// Prehistoric rock art survey sheets
    RockArt,
}

impl Default for Profile {
    fn default() -> Self {
        Self::Forensic
    }
}

/// Forensic analysis protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForensicMode {
    Anomalies = 0,
    Substances = 1,
    Spatial = 2,
    Trajectory = 3,
    FullReport = 4,
}

/// Rock art survey analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockArtMode {
    FullReport = 0,
    Symbology = 1,
    TechniqueGeo = 2,
    CulturalCompare = 3,
    ExpertValidation = 4,
}

/// A selectable analysis, tagged with the profile it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisMode {
    Forensic(ForensicMode),
    RockArt(RockArtMode),
}

/// Static description of one mode
#[derive(Debug)]
pub struct ModeSpec {
    pub mode: AnalysisMode,
    /// Stable key used on the command line and in JSON output
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Icon name from the lucide set, for front ends that draw one
    pub icon: Option<&'static str>,
    pub template: &'static str,
    /// Whether the prompt must pin the real date for the report header
    pub dated_report: bool,
}

/// Static description of one profile
#[derive(Debug)]
pub struct ProfileSpec {
    pub profile: Profile,
    pub product_name: &'static str,
    pub system_instruction: &'static str,
    /// What several images are views of, in the multi-image clause
    pub subject: &'static str,
    /// How the model should use the user's notes
    pub notes_instruction: &'static str,
    /// Shown when the model completes without producing any text
    pub no_findings: &'static str,
    pub pdf_title: &'static str,
    pub doc_title: &'static str,
    pub file_stem: &'static str,
    pub modes: &'static [ModeSpec; 5],
}

pub static FORENSIC_MODES: [ModeSpec; 5] = [
    ModeSpec {
        mode: AnalysisMode::Forensic(ForensicMode::Anomalies),
        key: "anomalies",
        label: "Anomalie Visive",
        description: "Rilevamento discrepanze.",
        icon: Some("microscope"),
        template: FORENSIC_ANOMALIES,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::Forensic(ForensicMode::Substances),
        key: "substances",
        label: "Sostanze",
        description: "Analisi visiva texture.",
        icon: Some("layers"),
        template: FORENSIC_SUBSTANCES,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::Forensic(ForensicMode::Spatial),
        key: "spatial",
        label: "Spaziale",
        description: "Mappatura distanze.",
        icon: Some("ruler"),
        template: FORENSIC_SPATIAL,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::Forensic(ForensicMode::Trajectory),
        key: "trajectory",
        label: "Traiettorie",
        description: "Angoli di impatto.",
        icon: Some("target"),
        template: FORENSIC_TRAJECTORY,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::Forensic(ForensicMode::FullReport),
        key: "full-report",
        label: "Dossier Forense Completo",
        description: "Rapporto tecnico datato, tutte le sezioni.",
        icon: Some("file-check"),
        template: FORENSIC_FULL_REPORT,
        dated_report: true,
    },
];

pub static ROCK_ART_MODES: [ModeSpec; 5] = [
    ModeSpec {
        mode: AnalysisMode::RockArt(RockArtMode::FullReport),
        key: "full-report",
        label: "Scheda di Rilievo",
        description: "Scheda archeologica completa.",
        icon: Some("file-text"),
        template: ROCK_ART_FULL_REPORT,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::RockArt(RockArtMode::Symbology),
        key: "symbology",
        label: "Simbologia",
        description: "Grafemi e iconografia.",
        icon: Some("shapes"),
        template: ROCK_ART_SYMBOLOGY,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::RockArt(RockArtMode::TechniqueGeo),
        key: "technique-geo",
        label: "Tecnica e Geologia",
        description: "Esecuzione e supporto litico.",
        icon: Some("hammer"),
        template: ROCK_ART_TECHNIQUE_GEO,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::RockArt(RockArtMode::CulturalCompare),
        key: "cultural-compare",
        label: "Confronto Culturale",
        description: "Stili affini e timeline.",
        icon: Some("landmark"),
        template: ROCK_ART_CULTURAL_COMPARE,
        dated_report: false,
    },
    ModeSpec {
        mode: AnalysisMode::RockArt(RockArtMode::ExpertValidation),
        key: "expert-validation",
        label: "Analisi Specialistica",
        description: "Leggibilità e chaîne opératoire.",
        icon: Some("brain-circuit"),
        template: ROCK_ART_EXPERT_VALIDATION,
        dated_report: false,
    },
];

pub static FORENSIC_PROFILE: ProfileSpec = ProfileSpec {
    profile: Profile::Forensic,
    product_name: "FotoCrime",
    system_instruction: FORENSIC_SYSTEM_INSTRUCTION,
    subject: "della stessa scena",
    notes_instruction: "Integra queste note operative nell'interpretazione (luogo, orario, circostanze note, reperti già repertati).",
    no_findings: "Il modello non ha rilevato elementi significativi per un'analisi forense.",
    pdf_title: "FOTOCRIME - RAPPORTO DI ANALISI FORENSE",
    doc_title: "FOTOCRIME - RAPPORTO TECNICO",
    file_stem: "Rapporto_Forense",
    modes: &FORENSIC_MODES,
};

pub static ROCK_ART_PROFILE: ProfileSpec = ProfileSpec {
    profile: Profile::RockArt,
    product_name: "Rilievo Rupestre",
    system_instruction: ROCK_ART_SYSTEM_INSTRUCTION,
    subject: "dello stesso pannello roccioso o sito",
    notes_instruction: "Integra queste note nel contesto (localizzazione, orientamento, datazione stratigrafica se nota).",
    no_findings: "Il modello non ha rilevato elementi significativi per un'analisi archeologica.",
    pdf_title: "RILIEVO RUPESTRE - SCHEDA DI ANALISI",
    doc_title: "RILIEVO RUPESTRE - SCHEDA TECNICA",
    file_stem: "Scheda_Rilievo",
    modes: &ROCK_ART_MODES,
};

impl Profile {
    pub fn spec(&self) -> &'static ProfileSpec {
        match self {
            Self::Forensic => &FORENSIC_PROFILE,
            Self::RockArt => &ROCK_ART_PROFILE,
        }
    }

    /// Short name used in config files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Self::Forensic => "forensic",
            Self::RockArt => "rock-art",
        }
    }

    /// All modes of this profile, in menu order
    pub fn modes(&self) -> &'static [ModeSpec] {
        self.spec().modes
    }

    /// Look up a mode by key (`full-report`, `full_report` and `FULL_REPORT` all match)
    pub fn parse_mode(&self, key: &str) -> Option<AnalysisMode> {
        let normalized = key.trim().to_ascii_lowercase().replace('_', "-");
        self.modes()
            .iter()
            .find(|spec| spec.key == normalized)
            .map(|spec| spec.mode)
    }

    /// Comma separated list of valid mode keys, for error messages
    pub fn mode_keys(&self) -> String {
        self.modes()
            .iter()
            .map(|spec| spec.key)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl AnalysisMode {
    pub fn spec(&self) -> &'static ModeSpec {
        match self {
            Self::Forensic(mode) => &FORENSIC_MODES[*mode as usize],
            Self::RockArt(mode) => &ROCK_ART_MODES[*mode as usize],
        }
    }

    pub fn profile(&self) -> Profile {
        match self {
            Self::Forensic(_) => Profile::Forensic,
            Self::RockArt(_) => Profile::RockArt,
        }
    }

    pub fn key(&self) -> &'static str {
        self.spec().key
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn template(&self) -> &'static str {
        self.spec().template
    }

    pub fn is_dated_report(&self) -> bool {
        self.spec().dated_report
    }

    /// `profile/key`, unique across profiles
    pub fn qualified_key(&self) -> String {
        format!("{}/{}", self.profile().key(), self.key())
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AnalysisMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.qualified_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: [Profile; 2] = [Profile::Forensic, Profile::RockArt];

    #[test]
    fn test_tables_are_indexed_by_discriminant() {
        for profile in PROFILES {
            for spec in profile.modes() {
                assert_eq!(spec.mode.spec().key, spec.key);
                assert_eq!(spec.mode.profile(), profile);
            }
        }
    }

    #[test]
    fn test_every_key_parses_back() {
        for profile in PROFILES {
            for spec in profile.modes() {
                assert_eq!(profile.parse_mode(spec.key), Some(spec.mode));
            }
        }
    }

    #[test]
    fn test_parse_mode_normalizes_key() {
        assert_eq!(
            Profile::Forensic.parse_mode("FULL_REPORT"),
            Some(AnalysisMode::Forensic(ForensicMode::FullReport))
        );
        assert_eq!(
            Profile::RockArt.parse_mode(" technique_geo "),
            Some(AnalysisMode::RockArt(RockArtMode::TechniqueGeo))
        );
    }

    #[test]
    fn test_parse_mode_rejects_other_profile_keys() {
        assert_eq!(Profile::Forensic.parse_mode("symbology"), None);
        assert_eq!(Profile::RockArt.parse_mode("trajectory"), None);
        assert_eq!(Profile::Forensic.parse_mode("invalid"), None);
    }

    #[test]
    fn test_only_forensic_full_report_is_dated() {
        let dated: Vec<_> = PROFILES
            .iter()
            .flat_map(|p| p.modes())
            .filter(|spec| spec.dated_report)
            .map(|spec| spec.mode)
            .collect();
        assert_eq!(dated, vec![AnalysisMode::Forensic(ForensicMode::FullReport)]);
    }

    #[test]
    fn test_mode_serializes_as_qualified_key() {
        let mode = AnalysisMode::RockArt(RockArtMode::CulturalCompare);
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, "\"rock-art/cultural-compare\"");
    }
}

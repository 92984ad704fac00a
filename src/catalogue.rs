//! The component catalogue panel: what can be inserted, what the user is
//! asked for, and the insertion routine itself.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::InsertError;
use crate::placement::{Placement, placement_for_surface};
use crate::surface::RenderSurface;

pub const MAX_BITS: u32 = 64;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    Not,
    Repeater,
    Dff,
    Memory,
    NumEntry,
    NumDisplay,
    Button,
    Lamp,
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueGroup {
    Gates,
    Registers,
    Memories,
    InputsOutputs,
}

impl CatalogueGroup {
    pub const ALL: [CatalogueGroup; 4] = [
        CatalogueGroup::Gates,
        CatalogueGroup::Registers,
        CatalogueGroup::Memories,
        CatalogueGroup::InputsOutputs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CatalogueGroup::Gates => "Gates",
            CatalogueGroup::Registers => "Registers",
            CatalogueGroup::Memories => "Memories",
            CatalogueGroup::InputsOutputs => "Inputs/Outputs",
        }
    }
}

/// What the insertion dialog has to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    None,
    Bits,
    Name,
    BitsAndName,
}

impl Prompt {
    pub fn needs_bits(self) -> bool {
        matches!(self, Prompt::Bits | Prompt::BitsAndName)
    }

    pub fn needs_name(self) -> bool {
        matches!(self, Prompt::Name | Prompt::BitsAndName)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueEntry {
    pub kind: ComponentKind,
    pub key: &'static str,
    pub group: CatalogueGroup,
    pub title: &'static str,
    /// Cell type written into the canvas state.
    pub cell_type: &'static str,
    pub id_prefix: &'static str,
    /// Nominal rendered size.
    pub size: (f64, f64),
    pub prompt: Prompt,
}

const GATE: (f64, f64) = (60.0, 50.0);
const PIN: (f64, f64) = (60.0, 30.0);
const SWITCH: (f64, f64) = (30.0, 30.0);

static CATALOGUE: [CatalogueEntry; 15] = [
    CatalogueEntry {
        kind: ComponentKind::And,
        key: "and",
        group: CatalogueGroup::Gates,
        title: "AND",
        cell_type: "And",
        id_prefix: "and",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Or,
        key: "or",
        group: CatalogueGroup::Gates,
        title: "OR",
        cell_type: "Or",
        id_prefix: "or",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Xor,
        key: "xor",
        group: CatalogueGroup::Gates,
        title: "XOR",
        cell_type: "Xor",
        id_prefix: "xor",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Nand,
        key: "nand",
        group: CatalogueGroup::Gates,
        title: "NAND",
        cell_type: "Nand",
        id_prefix: "nand",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Nor,
        key: "nor",
        group: CatalogueGroup::Gates,
        title: "NOR",
        cell_type: "Nor",
        id_prefix: "nor",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Xnor,
        key: "xnor",
        group: CatalogueGroup::Gates,
        title: "XNOR",
        cell_type: "Xnor",
        id_prefix: "xnor",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Not,
        key: "not",
        group: CatalogueGroup::Gates,
        title: "NOT",
        cell_type: "Not",
        id_prefix: "not",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Repeater,
        key: "repeater",
        group: CatalogueGroup::Gates,
        title: "Buffer",
        cell_type: "Repeater",
        id_prefix: "buf",
        size: GATE,
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Dff,
        key: "dff",
        group: CatalogueGroup::Registers,
        title: "D flip-flop",
        cell_type: "Dff",
        id_prefix: "dff",
        size: (60.0, 70.0),
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::Memory,
        key: "memory",
        group: CatalogueGroup::Memories,
        title: "Memory",
        cell_type: "Memory",
        id_prefix: "mem",
        size: (100.0, 120.0),
        prompt: Prompt::Bits,
    },
    CatalogueEntry {
        kind: ComponentKind::NumEntry,
        key: "num_entry",
        group: CatalogueGroup::InputsOutputs,
        title: "Input",
        cell_type: "NumEntry",
        id_prefix: "in",
        size: PIN,
        prompt: Prompt::BitsAndName,
    },
    CatalogueEntry {
        kind: ComponentKind::NumDisplay,
        key: "num_display",
        group: CatalogueGroup::InputsOutputs,
        title: "Output",
        cell_type: "NumDisplay",
        id_prefix: "out",
        size: PIN,
        prompt: Prompt::BitsAndName,
    },
    CatalogueEntry {
        kind: ComponentKind::Button,
        key: "button",
        group: CatalogueGroup::InputsOutputs,
        title: "Button",
        cell_type: "Button",
        id_prefix: "btn",
        size: SWITCH,
        prompt: Prompt::Name,
    },
    CatalogueEntry {
        kind: ComponentKind::Lamp,
        key: "lamp",
        group: CatalogueGroup::InputsOutputs,
        title: "Lamp",
        cell_type: "Lamp",
        id_prefix: "lamp",
        size: SWITCH,
        prompt: Prompt::Name,
    },
    CatalogueEntry {
        kind: ComponentKind::Clock,
        key: "clock",
        group: CatalogueGroup::InputsOutputs,
        title: "Clock",
        cell_type: "Clock",
        id_prefix: "clk",
        size: SWITCH,
        prompt: Prompt::None,
    },
];

impl ComponentKind {
    pub fn entry(self) -> &'static CatalogueEntry {
        // The table lists kinds in declaration order.
        &CATALOGUE[self as usize]
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry().key)
    }
}

impl FromStr for ComponentKind {
    type Err = InsertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        CATALOGUE
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.kind)
            .ok_or_else(|| InsertError::UnknownKind(s.to_string()))
    }
}

pub fn catalogue() -> &'static [CatalogueEntry] {
    &CATALOGUE
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    pub group: CatalogueGroup,
    pub title: &'static str,
    pub entries: Vec<&'static CatalogueEntry>,
}

/// Catalogue entries grouped into menu sections, in display order.
pub fn catalogue_menu() -> Vec<MenuSection> {
    CatalogueGroup::ALL
        .iter()
        .map(|group| MenuSection {
            group: *group,
            title: group.title(),
            entries: CATALOGUE.iter().filter(|entry| entry.group == *group).collect(),
        })
        .collect()
}

/// A component the user asked to insert, with the dialog answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub kind: ComponentKind,
    #[serde(default)]
    pub bits: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ComponentSpec {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            bits: None,
            name: None,
        }
    }

    pub fn with_bits(mut self, bits: u32) -> Self {
        self.bits = Some(bits);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<(), InsertError> {
        let entry = self.kind.entry();
        if entry.prompt.needs_bits() {
            let bits = self.bits.ok_or(InsertError::MissingBits { kind: entry.title })?;
            if bits == 0 || bits > MAX_BITS {
                return Err(InsertError::InvalidBits {
                    bits,
                    max: MAX_BITS,
                });
            }
        }
        if entry.prompt.needs_name() {
            let name = self
                .name
                .as_deref()
                .ok_or(InsertError::MissingName { kind: entry.title })?;
            if !NAME_RE.is_match(name) {
                return Err(InsertError::InvalidName(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.kind.entry().title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inserted {
    pub id: String,
    pub placement: Placement,
}

/// Inserts catalogue components onto a surface, remembering the last one
/// so the next insertion can stack below it.
#[derive(Debug, Clone, Default)]
pub struct CataloguePanel {
    config: Config,
    last_placed: Option<String>,
}

impl CataloguePanel {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            last_placed: None,
        }
    }

    pub fn with_last_placed(mut self, id: Option<String>) -> Self {
        self.last_placed = id;
        self
    }

    pub fn last_placed(&self) -> Option<&str> {
        self.last_placed.as_deref()
    }

    pub fn insert<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        spec: &ComponentSpec,
    ) -> Result<Inserted, InsertError> {
        spec.validate()?;
        // Plan for the box the surface is about to create.
        let placement_config = self.config.placement.for_size(spec.kind.entry().size);
        let placement = placement_for_surface(
            &*surface,
            self.last_placed.as_deref(),
            &placement_config,
            &self.config.viewport,
        );
        let label = spec.label();
        let id = surface.create_component_at(spec, &label, placement.x, placement.y)?;
        tracing::info!(
            kind = %spec.kind,
            id = %id,
            x = placement.x,
            y = placement.y,
            strategy = ?placement.strategy,
            "component inserted"
        );
        self.last_placed = Some(id.clone());
        Ok(Inserted { id, placement })
    }
}

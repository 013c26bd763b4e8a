//! Fixed field schema of a tasting card.
//!
//! Every category shares the same layout; only the field suffix and the
//! colour vocabulary differ. Screens, the save path and the archive detail
//! view all read their field lists from here so a record is always written
//! with the complete set of keys.

use super::category::WineCategory;

/// Container suffix used by button boxes on form screens.
pub const CONTAINER_SUFFIX: &str = "_box";

/// Placeholder the alcohol spinner shows before a value is chosen.
pub const ALCOHOL_PLACEHOLDER: &str = "Gradazione alcolica";

/// Suggested alcohol levels offered by the alcohol spinner.
pub const ALCOHOL_LEVELS: &[&str] = &[
    "9", "9.5", "10", "10.5", "11", "11.5", "12", "12.5", "13", "13.5", "14", "14.5", "15",
    "15.5", "16",
];

/// The ordered form screens of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormStep {
    View,
    Nose,
    Palate,
    Conclusion,
    Info,
}

impl FormStep {
    pub const ALL: [FormStep; 5] = [
        FormStep::View,
        FormStep::Nose,
        FormStep::Palate,
        FormStep::Conclusion,
        FormStep::Info,
    ];

    pub fn first() -> Self {
        FormStep::View
    }

    pub fn next(self) -> Option<Self> {
        match self {
            FormStep::View => Some(FormStep::Nose),
            FormStep::Nose => Some(FormStep::Palate),
            FormStep::Palate => Some(FormStep::Conclusion),
            FormStep::Conclusion => Some(FormStep::Info),
            FormStep::Info => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            FormStep::View => None,
            FormStep::Nose => Some(FormStep::View),
            FormStep::Palate => Some(FormStep::Nose),
            FormStep::Conclusion => Some(FormStep::Palate),
            FormStep::Info => Some(FormStep::Conclusion),
        }
    }

    fn stem(self) -> &'static str {
        match self {
            FormStep::View => "vista",
            FormStep::Nose => "naso",
            FormStep::Palate => "palato",
            FormStep::Conclusion => "conclusioni",
            FormStep::Info => "info",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::View => "Vista",
            FormStep::Nose => "Olfatto",
            FormStep::Palate => "Palato",
            FormStep::Conclusion => "Conclusioni",
            FormStep::Info => "Info",
        }
    }

    /// Screen identifier, e.g. `vista_rosso`.
    pub fn screen_name(self, category: WineCategory) -> String {
        category.field(self.stem())
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
            + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

enum Options {
    Fixed(&'static [&'static str]),
    Colour,
}

struct ContainerDef {
    stem: &'static str,
    field_stem: &'static str,
    title: &'static str,
    mode: SelectionMode,
    options: Options,
}

const LIMPIDEZZA: &[&str] = &["Velato", "Abbastanza limpido", "Limpido", "Cristallino", "Brillante"];
const INTENSITA_VISTA: &[&str] = &["Tenue", "Media", "Intensa"];
const CONDIZIONE: &[&str] = &["Franco", "Difettoso"];
const INTENSITA_NASO: &[&str] = &["Leggera", "Media", "Pronunciata"];
const PRIMARI: &[&str] = &["Fruttato", "Floreale", "Erbaceo", "Speziato", "Minerale"];
const SECONDARI: &[&str] = &["Burroso", "Lievito", "Crosta di pane", "Vaniglia", "Tostato"];
const TERZARI: &[&str] = &["Frutta secca", "Miele", "Cuoio", "Tabacco", "Terroso"];
const DOLCEZZA: &[&str] = &["Secco", "Abboccato", "Amabile", "Dolce"];
const LIVELLO: &[&str] = &["Bassa", "Media", "Alta"];
const ALCOLICO: &[&str] = &["Basso", "Medio", "Alto"];
const CORPO: &[&str] = &["Leggero", "Medio", "Pieno"];
const PERSISTENZA: &[&str] = &["Corta", "Media", "Lunga"];
const QUALITA: &[&str] = &["Scarsa", "Accettabile", "Buona", "Ottima", "Eccellente"];

const COLORE_ROSSO: &[&str] = &["Porpora", "Rubino", "Granato", "Aranciato"];
const COLORE_BIANCO: &[&str] = &["Verdolino", "Giallo paglierino", "Giallo dorato", "Ambrato"];
const COLORE_ROSATO: &[&str] = &["Tenue", "Cerasuolo", "Chiaretto", "Buccia di cipolla"];

const VIEW: &[ContainerDef] = &[
    ContainerDef {
        stem: "limpidezza",
        field_stem: "limpidezza",
        title: "Limpidezza",
        mode: SelectionMode::Single,
        options: Options::Fixed(LIMPIDEZZA),
    },
    ContainerDef {
        stem: "intensita_vista",
        field_stem: "intensita_vista",
        title: "Intensità",
        mode: SelectionMode::Single,
        options: Options::Fixed(INTENSITA_VISTA),
    },
    ContainerDef {
        stem: "colore",
        field_stem: "colore",
        title: "Colore",
        mode: SelectionMode::Single,
        options: Options::Colour,
    },
];

const NOSE: &[ContainerDef] = &[
    ContainerDef {
        stem: "condizione",
        field_stem: "condizione",
        title: "Condizione",
        mode: SelectionMode::Single,
        options: Options::Fixed(CONDIZIONE),
    },
    ContainerDef {
        stem: "intensita_naso",
        field_stem: "intensita_naso",
        title: "Intensità",
        mode: SelectionMode::Single,
        options: Options::Fixed(INTENSITA_NASO),
    },
    ContainerDef {
        stem: "profumo_primari",
        field_stem: "profumo",
        title: "Profumi primari",
        mode: SelectionMode::Multiple,
        options: Options::Fixed(PRIMARI),
    },
    ContainerDef {
        stem: "profumo_secondari",
        field_stem: "profumo",
        title: "Profumi secondari",
        mode: SelectionMode::Multiple,
        options: Options::Fixed(SECONDARI),
    },
    ContainerDef {
        stem: "profumo_terzari",
        field_stem: "profumo",
        title: "Profumi terziari",
        mode: SelectionMode::Multiple,
        options: Options::Fixed(TERZARI),
    },
];

const PALATE: &[ContainerDef] = &[
    ContainerDef {
        stem: "dolcezza",
        field_stem: "dolcezza",
        title: "Dolcezza",
        mode: SelectionMode::Single,
        options: Options::Fixed(DOLCEZZA),
    },
    ContainerDef {
        stem: "acidita",
        field_stem: "acidita",
        title: "Acidità",
        mode: SelectionMode::Single,
        options: Options::Fixed(LIVELLO),
    },
    ContainerDef {
        stem: "tannicita",
        field_stem: "tannicita",
        title: "Tannicità",
        mode: SelectionMode::Single,
        options: Options::Fixed(LIVELLO),
    },
    ContainerDef {
        stem: "livello_alcolico",
        field_stem: "livello_alcolico",
        title: "Alcol",
        mode: SelectionMode::Single,
        options: Options::Fixed(ALCOLICO),
    },
    ContainerDef {
        stem: "corpo",
        field_stem: "corpo",
        title: "Corpo",
        mode: SelectionMode::Single,
        options: Options::Fixed(CORPO),
    },
    ContainerDef {
        stem: "sapore_primari",
        field_stem: "sapore",
        title: "Sapori primari",
        mode: SelectionMode::Multiple,
        options: Options::Fixed(PRIMARI),
    },
    ContainerDef {
        stem: "sapore_secondari",
        field_stem: "sapore",
        title: "Sapori secondari",
        mode: SelectionMode::Multiple,
        options: Options::Fixed(SECONDARI),
    },
    ContainerDef {
        stem: "sapore_terzari",
        field_stem: "sapore",
        title: "Sapori terziari",
        mode: SelectionMode::Multiple,
        options: Options::Fixed(TERZARI),
    },
    ContainerDef {
        stem: "persistenza",
        field_stem: "persistenza",
        title: "Persistenza",
        mode: SelectionMode::Single,
        options: Options::Fixed(PERSISTENZA),
    },
];

const CONCLUSION: &[ContainerDef] = &[ContainerDef {
    stem: "qualita",
    field_stem: "qualita",
    title: "Qualità",
    mode: SelectionMode::Single,
    options: Options::Fixed(QUALITA),
}];

/// One button box as laid out for a concrete category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Identifier of the box, e.g. `profumo_primari_rosso_box`.
    pub container_id: String,
    /// Record field the box writes to, e.g. `profumo_rosso`.
    pub field: String,
    pub title: &'static str,
    pub mode: SelectionMode,
    pub options: Vec<&'static str>,
}

fn colour_options(category: WineCategory) -> &'static [&'static str] {
    match category {
        WineCategory::Red => COLORE_ROSSO,
        WineCategory::White => COLORE_BIANCO,
        WineCategory::Rose => COLORE_ROSATO,
    }
}

fn definitions(step: FormStep) -> &'static [ContainerDef] {
    match step {
        FormStep::View => VIEW,
        FormStep::Nose => NOSE,
        FormStep::Palate => PALATE,
        FormStep::Conclusion => CONCLUSION,
        FormStep::Info => &[],
    }
}

/// Button boxes shown on `step` for `category`, in display order.
pub fn containers(step: FormStep, category: WineCategory) -> Vec<ContainerSpec> {
    definitions(step)
        .iter()
        .map(|def| ContainerSpec {
            container_id: format!("{}{}", category.field(def.stem), CONTAINER_SUFFIX),
            field: category.field(def.field_stem),
            title: def.title,
            mode: def.mode,
            options: match def.options {
                Options::Fixed(options) => options.to_vec(),
                Options::Colour => colour_options(category).to_vec(),
            },
        })
        .collect()
}

/// Canonical selection fields of a category, in record order.
pub fn selection_fields(category: WineCategory) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for step in FormStep::ALL {
        for def in definitions(step) {
            let field = category.field(def.field_stem);
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
    }
    fields
}

/// Free-text fields edited on the Info screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Producer,
    Vintage,
    Alcohol,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::Name,
        TextField::Producer,
        TextField::Vintage,
        TextField::Alcohol,
    ];

    fn stem(self) -> &'static str {
        match self {
            TextField::Name => "nome",
            TextField::Producer => "produttore",
            TextField::Vintage => "annata",
            TextField::Alcohol => "alcol",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextField::Name => "Nome",
            TextField::Producer => "Produttore",
            TextField::Vintage => "Annata",
            TextField::Alcohol => "Gradazione alcolica",
        }
    }

    pub fn key(self, category: WineCategory) -> String {
        category.field(self.stem())
    }

    /// Resolves a full field name (`nome_rosso`) or a bare stem (`nome`).
    pub fn from_key(category: WineCategory, key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key(category) == key || field.stem() == key)
    }
}

/// Every field a saved record of `category` carries.
pub fn record_fields(category: WineCategory) -> Vec<String> {
    TextField::ALL
        .iter()
        .map(|field| field.key(category))
        .chain(selection_fields(category))
        .collect()
}

pub fn is_selection_field(category: WineCategory, field: &str) -> bool {
    selection_fields(category).iter().any(|known| known == field)
}

/// Multi-select fields are stored as lists.
pub fn field_mode(category: WineCategory, field: &str) -> Option<SelectionMode> {
    FormStep::ALL
        .into_iter()
        .flat_map(|step| containers(step, category))
        .find(|spec| spec.field == field)
        .map(|spec| spec.mode)
}

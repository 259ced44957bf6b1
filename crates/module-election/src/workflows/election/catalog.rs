use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Module, ModuleId, Semester};

/// Read access to the modules offered for election.
pub trait ModuleCatalog: Send + Sync {
    fn module(&self, id: &ModuleId) -> Option<Module>;
    fn modules(&self) -> Vec<Module>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read module catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid module catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("module {module} lists unknown semester '{value}'")]
    UnknownSemester { module: ModuleId, value: String },
    #[error("module {0} appears more than once in the catalog")]
    DuplicateModule(ModuleId),
    #[error("module {0} is worth no credits")]
    ZeroCredits(ModuleId),
    #[error("catalog row without module identifier")]
    BlankIdentifier,
}

/// Catalog held in memory, keyed by module identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModuleCatalog {
    modules: BTreeMap<ModuleId, Module>,
}

impl InMemoryModuleCatalog {
    pub fn new(modules: Vec<Module>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for module in modules {
            if module.id.0.trim().is_empty() {
                return Err(CatalogError::BlankIdentifier);
            }
            if module.credits == 0 {
                return Err(CatalogError::ZeroCredits(module.id));
            }
            if by_id.contains_key(&module.id) {
                return Err(CatalogError::DuplicateModule(module.id));
            }
            by_id.insert(module.id.clone(), module);
        }
        Ok(Self { modules: by_id })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleCatalog for InMemoryModuleCatalog {
    fn module(&self, id: &ModuleId) -> Option<Module> {
        self.modules.get(id).cloned()
    }

    fn modules(&self) -> Vec<Module> {
        self.modules.values().cloned().collect()
    }
}

/// Loads module catalogs exported as CSV.
pub struct CsvModuleCatalog;

impl CsvModuleCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<InMemoryModuleCatalog, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<InMemoryModuleCatalog, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut modules = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            modules.push(row?.into_module()?);
        }

        tracing::debug!(modules = modules.len(), "module catalog parsed");
        InMemoryModuleCatalog::new(modules)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Identifier")]
    identifier: String,
    #[serde(rename = "Short Identifier")]
    short_identifier: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Credits")]
    credits: u32,
    #[serde(rename = "Language")]
    language: String,
    #[serde(rename = "Group", default)]
    group: String,
    #[serde(
        rename = "Paired Module",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    paired_module: Option<String>,
    #[serde(rename = "Semesters", default)]
    semesters: String,
}

impl CatalogRow {
    fn into_module(self) -> Result<Module, CatalogError> {
        if self.identifier.is_empty() {
            return Err(CatalogError::BlankIdentifier);
        }
        let id = ModuleId(self.identifier);
        let semesters = parse_semesters(&id, &self.semesters)?;

        Ok(Module {
            id,
            short_id: self.short_identifier,
            title: self.title,
            credits: self.credits,
            language: self.language,
            group: self.group,
            paired_module: self.paired_module,
            semesters,
        })
    }
}

fn parse_semesters(module: &ModuleId, raw: &str) -> Result<Vec<Semester>, CatalogError> {
    let mut semesters = Vec::new();
    for value in raw
        .split(|c: char| c == ';' || c == ',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        let semester = match value.to_ascii_lowercase().as_str() {
            "autumn" | "hs" => Semester::Autumn,
            "spring" | "fs" => Semester::Spring,
            _ => {
                return Err(CatalogError::UnknownSemester {
                    module: module.clone(),
                    value: value.to_string(),
                })
            }
        };
        if !semesters.contains(&semester) {
            semesters.push(semester);
        }
    }
    Ok(semesters)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

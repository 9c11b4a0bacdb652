use std::collections::BTreeMap;
use std::path::Path;

use nutriscreen_core::models::indicator::IndicatorKind;
use nutriscreen_core::models::sex::Sex;
use tracing::{debug, info};

use crate::error::StandardsError;
use crate::file::TableFile;
use crate::table::ReferenceTable;
use crate::validate::build_table;

/// Every reference table, keyed by indicator and sex.
///
/// A store is complete: construction fails unless all five indicators have
/// a table for both sexes.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    tables: BTreeMap<(IndicatorKind, Sex), ReferenceTable>,
}

impl ReferenceStore {
    /// Build a store from `(name, json)` pairs. `name` is only used in errors.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, StandardsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let files = sources
            .into_iter()
            .map(|(name, json)| Ok((name.to_string(), parse(name, json)?)))
            .collect::<Result<Vec<_>, StandardsError>>()?;
        Self::from_files(files)
    }

    /// Load `<dir>/<indicator>/<sex>.json` for every indicator and sex.
    pub fn load_dir(dir: &Path) -> Result<Self, StandardsError> {
        let mut files = Vec::with_capacity(IndicatorKind::ALL.len() * Sex::ALL.len());
        for indicator in IndicatorKind::ALL {
            for sex in Sex::ALL {
                let name = format!("{}/{}.json", indicator.id(), sex.id());
                let path = dir.join(indicator.id()).join(format!("{}.json", sex.id()));
                let json = match std::fs::read_to_string(&path) {
                    Ok(json) => json,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(StandardsError::MissingPartition { indicator, sex });
                    }
                    Err(source) => return Err(StandardsError::Io { path, source }),
                };
                let file = parse(&name, &json)?;
                if file.indicator != indicator || file.sex != sex {
                    return Err(StandardsError::Defect {
                        table: name,
                        index: None,
                        message: format!(
                            "file declares {}/{}",
                            file.indicator.id(),
                            file.sex.id()
                        ),
                    });
                }
                files.push((name, file));
            }
        }

        let store = Self::from_files(files)?;
        info!(dir = %dir.display(), tables = store.tables.len(), "reference data loaded");
        Ok(store)
    }

    fn from_files(files: Vec<(String, TableFile)>) -> Result<Self, StandardsError> {
        let mut tables = BTreeMap::new();
        for (name, file) in files {
            let table = build_table(&name, file)?;
            let key = (table.indicator, table.sex);
            if tables.contains_key(&key) {
                return Err(StandardsError::DuplicateTable {
                    indicator: key.0,
                    sex: key.1,
                });
            }
            debug!(table = %table.name(), version = %table.version, "reference table validated");
            tables.insert(key, table);
        }

        let store = ReferenceStore { tables };
        store.check_complete()?;
        Ok(store)
    }

    fn check_complete(&self) -> Result<(), StandardsError> {
        for indicator in IndicatorKind::ALL {
            for sex in Sex::ALL {
                if !self.tables.contains_key(&(indicator, sex)) {
                    return Err(StandardsError::MissingPartition { indicator, sex });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, indicator: IndicatorKind, sex: Sex) -> Option<&ReferenceTable> {
        self.tables.get(&(indicator, sex))
    }

    pub fn tables(&self) -> impl Iterator<Item = &ReferenceTable> {
        self.tables.values()
    }
}

fn parse(name: &str, json: &str) -> Result<TableFile, StandardsError> {
    serde_json::from_str(json).map_err(|source| StandardsError::Parse {
        name: name.to_string(),
        source,
    })
}

//! Common test utilities for integration tests.
//!
//! Provides an in-memory catalog that understands the DDL subset used by the bundled
//! schema scripts, so provisioning can be exercised for every dialect without a server.

#![allow(dead_code)]

use schema_provisioner::errors::{StatementError, StatementResult};
use schema_provisioner::storage::{ConnectionSource, Session};
use schema_provisioner::{ProvisionError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

/// Objects a fake database holds, keyed by lower-cased, unquoted name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Table name to the tables its foreign keys reference
    pub tables: BTreeMap<String, Vec<String>>,
    /// Index name to owning table
    pub indexes: BTreeMap<String, String>,
    pub sequences: BTreeSet<String>,
    /// Trigger name to owning table
    pub triggers: BTreeMap<String, String>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.indexes.is_empty()
            && self.sequences.is_empty()
            && self.triggers.is_empty()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Apply one DDL statement
    pub fn apply(&mut self, statement: &str) -> StatementResult {
        let tokens: Vec<String> = statement.split_whitespace().map(str::to_uppercase).collect();
        let mut words = tokens.iter().map(String::as_str).peekable();

        match words.next() {
            Some("CREATE") => {
                let replace = consume(&mut words, &["OR", "REPLACE"]);
                words.next_if_eq(&"UNIQUE");
                let kind = words.next().unwrap_or_default();
                let if_not_exists = consume(&mut words, &["IF", "NOT", "EXISTS"]);
                let name = object_name(words.next())?;
                self.create(kind, name, statement, &tokens, replace || if_not_exists, replace)
            }
            Some("DROP") => {
                let kind = words.next().unwrap_or_default();
                let if_exists = consume(&mut words, &["IF", "EXISTS"]);
                let name = object_name(words.next())?;
                let cascade = tokens.iter().any(|token| token == "CASCADE");
                self.drop_object(kind, name, if_exists, cascade)
            }
            _ => Err(syntax_error(statement)),
        }
    }

    fn create(
        &mut self,
        kind: &str,
        name: String,
        statement: &str,
        tokens: &[String],
        tolerate_existing: bool,
        replace: bool,
    ) -> StatementResult {
        let exists = match kind {
            "TABLE" => self.tables.contains_key(&name),
            "INDEX" => self.indexes.contains_key(&name),
            "SEQUENCE" => self.sequences.contains(&name),
            "TRIGGER" => self.triggers.contains_key(&name),
            _ => return Err(syntax_error(statement)),
        };
        if exists && !replace {
            return if tolerate_existing { Ok(()) } else { Err(already_exists(&name)) };
        }

        match kind {
            "TABLE" => {
                let references = following(tokens, "REFERENCES")
                    .map(|target| object_name(Some(target.as_str())))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if let Some(missing) = references.iter().find(|t| !self.tables.contains_key(*t)) {
                    return Err(does_not_exist(missing));
                }
                self.tables.insert(name, references);
            }
            "INDEX" | "TRIGGER" => {
                let table = object_name(following(tokens, "ON").next().map(String::as_str))?;
                if !self.tables.contains_key(&table) {
                    return Err(does_not_exist(&table));
                }
                let owners = if kind == "INDEX" { &mut self.indexes } else { &mut self.triggers };
                owners.insert(name, table);
            }
            _ => {
                self.sequences.insert(name);
            }
        }
        Ok(())
    }

    fn drop_object(
        &mut self,
        kind: &str,
        name: String,
        if_exists: bool,
        cascade: bool,
    ) -> StatementResult {
        let removed = match kind {
            "TABLE" => {
                let referenced_by = self
                    .tables
                    .iter()
                    .any(|(table, references)| *table != name && references.contains(&name));
                if referenced_by && !cascade && self.tables.contains_key(&name) {
                    return Err(StatementError::new(format!(
                        "cannot drop table {} because other objects depend on it",
                        name
                    ))
                    .with_code("2BP01"));
                }
                let removed = self.tables.remove(&name).is_some();
                if removed {
                    self.indexes.retain(|_, table| *table != name);
                    self.triggers.retain(|_, table| *table != name);
                    for references in self.tables.values_mut() {
                        references.retain(|table| *table != name);
                    }
                }
                removed
            }
            "INDEX" => self.indexes.remove(&name).is_some(),
            "SEQUENCE" => self.sequences.remove(&name),
            "TRIGGER" => self.triggers.remove(&name).is_some(),
            other => return Err(StatementError::new(format!("unsupported object kind {}", other))),
        };

        if removed || if_exists {
            Ok(())
        } else {
            Err(does_not_exist(&name))
        }
    }
}

fn consume<'a, I>(words: &mut std::iter::Peekable<I>, expected: &[&str]) -> bool
where
    I: Iterator<Item = &'a str> + Clone,
{
    let mut lookahead = words.clone();
    if expected.iter().all(|word| lookahead.next() == Some(*word)) {
        *words = lookahead;
        true
    } else {
        false
    }
}

/// Tokens that directly follow each occurrence of `keyword`
fn following<'a>(tokens: &'a [String], keyword: &'a str) -> impl Iterator<Item = &'a String> {
    tokens.windows(2).filter(move |pair| pair[0] == keyword).map(|pair| &pair[1])
}

/// `"event_journal"("ordering")` → `event_journal`
fn object_name(token: Option<&str>) -> std::result::Result<String, StatementError> {
    let token = token.ok_or_else(|| StatementError::new("missing object name"))?;
    let name = token.split('(').next().unwrap_or_default().trim_matches('"').to_lowercase();
    if name.is_empty() {
        return Err(StatementError::new(format!("invalid object name {}", token)));
    }
    Ok(name)
}

fn syntax_error(statement: &str) -> StatementError {
    let head = statement.split_whitespace().next().unwrap_or_default();
    StatementError::new(format!("syntax error at or near \"{}\"", head)).with_code("42601")
}

fn already_exists(name: &str) -> StatementError {
    StatementError::new(format!("relation \"{}\" already exists", name)).with_code("42P07")
}

fn does_not_exist(name: &str) -> StatementError {
    StatementError::new(format!("relation \"{}\" does not exist", name)).with_code("42P01")
}

#[derive(Debug, Default)]
struct DatabaseState {
    catalog: Catalog,
    executed: Vec<String>,
    opened: usize,
    closed: usize,
}

/// A named fake database reporting a fixed connection profile
#[derive(Debug, Clone)]
pub struct FakeDatabase {
    profile: String,
    state: Arc<Mutex<DatabaseState>>,
}

impl FakeDatabase {
    pub fn new(profile: &str) -> Self {
        Self { profile: profile.to_string(), state: Arc::default() }
    }

    fn state(&self) -> MutexGuard<'_, DatabaseState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn catalog(&self) -> Catalog {
        self.state().catalog.clone()
    }

    /// Every statement received, in order
    pub fn executed(&self) -> Vec<String> {
        self.state().executed.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state().opened
    }

    pub fn sessions_closed(&self) -> usize {
        self.state().closed
    }
}

/// Connection source over a set of fake databases keyed by configuration key
#[derive(Debug, Default, Clone)]
pub struct FakeConnections {
    databases: HashMap<String, FakeDatabase>,
}

impl FakeConnections {
    pub fn with_database(mut self, key: &str, database: &FakeDatabase) -> Self {
        self.databases.insert(key.to_string(), database.clone());
        self
    }
}

impl ConnectionSource for FakeConnections {
    fn acquire(&self, key: &str) -> Result<Box<dyn Session>> {
        let database =
            self.databases.get(key).ok_or_else(|| ProvisionError::unknown_database(key))?;
        database.state().opened += 1;
        Ok(Box::new(FakeSession { database: database.clone() }))
    }
}

struct FakeSession {
    database: FakeDatabase,
}

impl Session for FakeSession {
    fn profile(&self) -> &str {
        &self.database.profile
    }

    fn execute(&mut self, statement: &str) -> StatementResult {
        let mut state = self.database.state();
        state.executed.push(statement.to_string());
        state.catalog.apply(statement)
    }

    fn close(self: Box<Self>) -> StatementResult {
        self.database.state().closed += 1;
        Ok(())
    }
}

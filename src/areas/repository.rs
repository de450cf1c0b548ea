use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::branch::branch_name::Branch;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::config::Config;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

const OBJECTS_DIR: &str = "objects";
const INDEX_FILE: &str = "index";

/// Handle over one working directory and its `.gitlet` directory
///
/// Every operation goes through a handle, so independent repositories can be driven
/// side by side. Output meant for the user is written to `writer`.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    config: Config,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let gitlet_path = path.join(REPOSITORY_DIR);

        let index = Index::new(gitlet_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(gitlet_path.join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
            config: Config::default(),
        })
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(GitletError::not_found("Not in an initialized Gitlet directory.").into())
        }
    }

    /// Staging area freshly read from disk
    pub fn load_index(&'_ self) -> anyhow::Result<RefMut<'_, Index>> {
        self.ensure_initialized()?;

        let mut index = self.index();
        index.rehydrate()?;

        Ok(index)
    }

    /// The active branch and the commit at its tip
    pub fn active_commit(&self) -> anyhow::Result<(Branch, Commit)> {
        self.ensure_initialized()?;

        let branch = self.refs.active_branch()?;
        let commit = self.database.parse_object_as_commit(branch.oid())?;

        Ok((branch, commit))
    }
}

//! Owner of the single live proficiency session
//!
//! Only one allocation session exists at a time. Opening a new one replaces
//! the old; a failed open leaves the old one untouched.

use crate::character::{Character, StatAccessor};
use crate::core::config::{config, EngineConfig};
use crate::core::error::{ProfError, Result};
use crate::profs::allocation::MutationOutcome;
use crate::profs::commit::CommitReport;
use crate::profs::session::{ProfsSession, ProfsWindow, SessionRequest};
use crate::tables::GameTables;

pub struct AllocationEngine<W: ProfsWindow> {
    config: EngineConfig,
    session: Option<ProfsSession<W>>,
}

impl<W: ProfsWindow> Default for AllocationEngine<W> {
    fn default() -> Self {
        Self::new(config().clone())
    }
}

impl<W: ProfsWindow> AllocationEngine<W> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a session, replacing any open one
    pub fn open(
        &mut self,
        request: &SessionRequest,
        character: &Character,
        tables: &GameTables,
        window: W,
        on_change: impl FnMut() + 'static,
    ) -> Result<()> {
        let session = ProfsSession::open(
            request,
            character,
            tables,
            &self.config,
            window,
            Box::new(on_change),
        )?;
        if let Some(previous) = self.session.replace(session) {
            tracing::debug!(
                session = previous.session_type().name(),
                "Discarded uncommitted proficiency session"
            );
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ProfsSession<W>> {
        self.session.as_ref()
    }

    pub fn on_increment(&mut self, slot: usize) -> Result<MutationOutcome> {
        Ok(self.session_mut()?.on_increment(slot))
    }

    pub fn on_decrement(&mut self, slot: usize) -> Result<MutationOutcome> {
        Ok(self.session_mut()?.on_decrement(slot))
    }

    pub fn on_inspect(&mut self, slot: usize) -> Result<()> {
        self.session_mut()?.on_inspect(slot);
        Ok(())
    }

    pub fn on_scroll(&mut self, top: usize) -> Result<()> {
        self.session_mut()?.on_scroll(top);
        Ok(())
    }

    /// Write the open session into the character and close it
    pub fn commit(&mut self, accessor: &mut impl StatAccessor) -> Result<CommitReport> {
        let session = self.session.take().ok_or(ProfError::NoActiveSession)?;
        Ok(session.commit(accessor))
    }

    /// Close the open session without writing anything
    ///
    /// Returns whether a session was open.
    pub fn abandon(&mut self) -> bool {
        let abandoned = self.session.take().is_some();
        if abandoned {
            tracing::debug!("Abandoned proficiency session");
        }
        abandoned
    }

    fn session_mut(&mut self) -> Result<&mut ProfsSession<W>> {
        self.session.as_mut().ok_or(ProfError::NoActiveSession)
    }
}

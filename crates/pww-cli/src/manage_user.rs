//! # `manageuser` Subcommand
//!
//! Updates the domain, contractor type, and supervisor list of a CMS user.
//! Only administrators may run it.
//!
//! ```bash
//! pwwctl manageuser 0b4f7e2e --domain 5
//! pwwctl manageuser 0b4f7e2e --domain design --contractortype sub --supervisoruserids "a,b"
//! ```
//!
//! Steps run strictly in order and each one is logged at `debug`:
//! identity check, admin check, fetch of the current record, reconciliation,
//! submission. No lookup or update happens before the admin check passes.

use std::io::Write;

use clap::Args;

use crate::context::CommandContext;
use crate::error::{AuthorizationError, CommandError};
use crate::output::print_json;
use crate::prompt::{Console, LineSource};
use crate::reconcile::{reconcile, AttributeFlags};

/// Arguments for `pwwctl manageuser`.
#[derive(Args, Debug)]
pub struct ManageUserArgs {
    /// ID of the user to update.
    #[arg(value_name = "USERID")]
    pub user_id: String,

    /// Domain code (1-6) or name (developer, marketing, community, research, design, documentation).
    #[arg(long)]
    pub domain: Option<String>,

    /// Contractor type code (1-3) or name (direct, supervisor, sub).
    #[arg(long = "contractortype")]
    pub contractor_type: Option<String>,

    /// Comma separated supervisor user IDs, e.g. "id1,id2".
    #[arg(long = "supervisoruserids")]
    pub supervisor_user_ids: Option<String>,
}

impl ManageUserArgs {
    fn flags(&self) -> AttributeFlags {
        AttributeFlags {
            domain: self.domain.clone(),
            contractor_type: self.contractor_type.clone(),
            supervisor_user_ids: self.supervisor_user_ids.clone(),
        }
    }
}

/// Progress of a `manageuser` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageUserStage {
    /// Require a loaded identity.
    CheckIdentity,
    /// Require an administrator session.
    CheckAdmin,
    /// Fetch the target's current record.
    FetchCurrent,
    /// Settle every attribute.
    Reconcile,
    /// Send the update.
    Submit,
    /// Finished.
    Done,
}

/// Execute `manageuser`, asking questions on `console` and printing the
/// server's reply to its output.
pub fn run_manage_user<R: LineSource, W: Write>(
    args: &ManageUserArgs,
    ctx: &CommandContext<'_>,
    console: &mut Console<R, W>,
) -> Result<(), CommandError> {
    let mut stage = ManageUserStage::CheckIdentity;
    tracing::debug!(?stage);
    if ctx.identity.is_none() {
        return Err(AuthorizationError::NoIdentity.into());
    }

    stage = ManageUserStage::CheckAdmin;
    tracing::debug!(?stage);
    let me = ctx.api.me()?;
    if !me.is_admin {
        return Err(AuthorizationError::NotAdmin.into());
    }

    stage = ManageUserStage::FetchCurrent;
    tracing::debug!(?stage);
    let user_id = args.user_id.trim();
    let current = ctx.api.user_details(user_id).map_err(|e| {
        if e.is_not_found() {
            CommandError::Lookup(e)
        } else {
            CommandError::Transport(e)
        }
    })?;

    stage = ManageUserStage::Reconcile;
    tracing::debug!(?stage);
    let request = reconcile(console, user_id, &current, &args.flags())?;

    stage = ManageUserStage::Submit;
    tracing::debug!(?stage, ?request);
    let reply = ctx.api.manage_user(&request)?;
    print_json(console.output(), ctx.format, &reply)?;

    stage = ManageUserStage::Done;
    tracing::info!(?stage, user_id, "user updated");
    Ok(())
}

//! # Attribute Reconciler
//!
//! Decides, for each of domain, contractor type, and supervisor list,
//! whether the value comes from a flag, from the interactive wizard, or is
//! missing, then merges the answers with the user's current server record
//! into a [`ManageUser`] request.
//!
//! A flag counts as supplied only when it is present and non-blank.
//!
//! | domain | contractor | supervisors | domain | contractor | supervisors | review |
//! |--------|------------|-------------|--------|------------|-------------|--------|
//! | –      | –          | –           | Prompt | Prompt     | Prompt      | yes    |
//! | D      | –          | –           | Flag   | Prompt     | Prompt      | yes    |
//! | –      | C          | –           | Prompt | Flag       | Prompt      | yes    |
//! | D      | C          | –           | Flag   | Flag       | Prompt      | yes    |
//! | –      | –          | S           | Missing| Missing    | Flag        | no     |
//! | D      | –          | S           | Flag   | Prompt     | Flag        | no     |
//! | –      | C          | S           | Prompt | Flag       | Flag        | no     |
//! | D      | C          | S           | Flag   | Flag       | Flag        | no     |
//!
//! Prompted fields are asked first. Flags are parsed afterwards, when the
//! request is assembled, so a bad flag value fails once the wizard is done.
//! `Missing` fields, and prompted fields declined while unset on the server,
//! end in [`ValidationError::Unresolved`].

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use pww_core::{
    parse_supervisor_list, CodedEnum, ContractorType, Domain, ManageUser, PendingUpdate,
    UserRecord, ValidationError,
};

use crate::error::CommandError;
use crate::prompt::{Console, LineSource};

/// Printed before the final pause of a wizard that edited supervisors.
pub const REVIEW_NOTICE: &str = "Please carefully review your information and ensure it's correct. \
If not, press Ctrl + C to exit. Or, press Enter to continue your request.";

/// Raw attribute flags of `manageuser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFlags {
    /// `--domain`
    pub domain: Option<String>,
    /// `--contractortype`
    pub contractor_type: Option<String>,
    /// `--supervisoruserids`
    pub supervisor_user_ids: Option<String>,
}

impl AttributeFlags {
    fn domain(&self) -> Option<&str> {
        supplied(&self.domain)
    }

    fn contractor_type(&self) -> Option<&str> {
        supplied(&self.contractor_type)
    }

    fn supervisor_user_ids(&self) -> Option<&str> {
        supplied(&self.supervisor_user_ids)
    }
}

fn supplied(flag: &Option<String>) -> Option<&str> {
    flag.as_deref().filter(|v| !v.trim().is_empty())
}

/// Where a field's final value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Parsed from the command-line flag.
    Flag,
    /// Asked interactively, defaulting to the server value.
    Prompt,
    /// Neither; resolution fails.
    Missing,
}

/// Per-field sources for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// Domain source.
    pub domain: Source,
    /// Contractor type source.
    pub contractor_type: Source,
    /// Supervisor list source.
    pub supervisors: Source,
    /// Whether the wizard ends with the review pause.
    pub review: bool,
}

impl Plan {
    /// Whether any question will be asked.
    pub fn is_interactive(&self) -> bool {
        [self.domain, self.contractor_type, self.supervisors].contains(&Source::Prompt)
    }
}

/// Look up the decision table row for `flags`.
pub fn plan(flags: &AttributeFlags) -> Plan {
    use Source::{Flag, Missing, Prompt};

    let row = (
        flags.domain().is_some(),
        flags.contractor_type().is_some(),
        flags.supervisor_user_ids().is_some(),
    );
    let (domain, contractor_type, supervisors) = match row {
        (false, false, false) => (Prompt, Prompt, Prompt),
        (true, false, false) => (Flag, Prompt, Prompt),
        (false, true, false) => (Prompt, Flag, Prompt),
        (true, true, false) => (Flag, Flag, Prompt),
        (false, false, true) => (Missing, Missing, Flag),
        (true, false, true) => (Flag, Prompt, Flag),
        (false, true, true) => (Prompt, Flag, Flag),
        (true, true, true) => (Flag, Flag, Flag),
    };
    Plan {
        domain,
        contractor_type,
        supervisors,
        review: supervisors == Prompt,
    }
}

/// Resolve every attribute of `user_id` and build the outgoing request.
pub fn reconcile<R: LineSource, W: Write>(
    console: &mut Console<R, W>,
    user_id: &str,
    current: &UserRecord,
    flags: &AttributeFlags,
) -> Result<ManageUser, CommandError> {
    let plan = plan(flags);
    tracing::debug!(?plan, "reconciling user attributes");

    let mut pending = PendingUpdate::new(user_id);

    if plan.domain == Source::Prompt {
        let menu = menu(
            "Domain Type: ",
            Domain::all().iter().map(|d| (d.code(), d.name())),
        );
        pending.domain = prompt_attribute(
            console,
            ("The", "Domain"),
            current.domain,
            &menu,
            "domain type",
        )?;
    }
    if plan.contractor_type == Source::Prompt {
        let menu = menu(
            "",
            ContractorType::all().iter().map(|t| (t.code(), t.name())),
        );
        pending.contractor_type = prompt_attribute(
            console,
            ("Your", "Contractor Type"),
            current.contractor_type,
            &menu,
            "contractor type",
        )?;
    }
    if plan.supervisors == Source::Prompt {
        pending.supervisor_user_ids = Some(prompt_supervisors(
            console,
            &current.supervisor_user_ids,
        )?);
    }
    if plan.review {
        console.pause(REVIEW_NOTICE)?;
    }

    if pending.domain.is_none() {
        pending.domain = Some(from_flag(flags.domain(), "domain", "domain")?);
    }
    if pending.contractor_type.is_none() {
        pending.contractor_type = Some(from_flag(
            flags.contractor_type(),
            "contractor type",
            "contractortype",
        )?);
    }
    if let Some(raw) = flags.supervisor_user_ids() {
        pending.supervisor_user_ids = Some(parse_supervisor_list(raw)?);
    }

    Ok(pending.into_request()?)
}

fn from_flag<T>(
    raw: Option<&str>,
    field: &'static str,
    flag: &'static str,
) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match raw {
        Some(raw) => raw.parse(),
        None => Err(ValidationError::Unresolved { field, flag }),
    }
}

fn menu<'a>(title: &str, entries: impl Iterator<Item = (u8, &'a str)>) -> String {
    let options: Vec<String> = entries
        .map(|(code, name)| format!("({code}) {name}"))
        .collect();
    format!("{title}{}:  ", options.join(", "))
}

/// Offer to change one enumerated attribute. Declining keeps `current`.
///
/// `(owner, label)` word the update question: `("The", "Domain")` asks
/// `The current Domain setting is: ... Update?`.
fn prompt_attribute<T, R, W>(
    console: &mut Console<R, W>,
    (owner, label): (&str, &str),
    current: Option<T>,
    menu: &str,
    kind: &str,
) -> Result<Option<T>, CommandError>
where
    T: CodedEnum + Display,
    R: LineSource,
    W: Write,
{
    let shown = current.map_or_else(|| "unset".to_string(), |v| v.to_string());
    let question = format!("{owner} current {label} setting is: \"{shown}\" Update?");
    if !console.confirm(&question, false)? {
        return Ok(current);
    }
    loop {
        let choice: T = console.choose(menu, kind)?;
        let question = format!("Your current {label} setting is: \"{choice}\" Keep this?");
        if console.confirm(&question, true)? {
            return Ok(Some(choice));
        }
    }
}

fn prompt_supervisors<R: LineSource, W: Write>(
    console: &mut Console<R, W>,
    current: &[String],
) -> Result<Vec<String>, CommandError> {
    let question = format!("The current Supervisor IDs are: {current:?} Update?");
    if !console.confirm(&question, false)? {
        return Ok(current.to_vec());
    }
    Ok(console.build_list(
        current.to_vec(),
        "Add another Supervisor User ID: ",
        "Supervisor User ID",
        "Supervisor IDs",
    )?)
}

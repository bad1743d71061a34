//! Screen-level sequences: each awaits one store call before issuing the
//! next dependent one, then updates the session.

use thiserror::Error;

use crate::{
    session::{SessionError, SessionState},
    types::{DateError, EntryDate, EntryId},
};

use super::handle::{DiaryHandle, RuntimeError};

/// Failure of a screen-level sequence.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The form was not in a savable state.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Stepping past the supported date range.
    #[error(transparent)]
    Date(#[from] DateError),
    /// The store call failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Saves the compose form and clears it for the next entry.
///
/// On failure the form is left untouched so the user can retry.
pub async fn save_and_reset(handle: &DiaryHandle, session: &mut SessionState) -> Result<EntryId, FlowError> {
    let draft = session.draft()?;
    let id = handle.upsert(draft).await?;
    session.reset_form();
    Ok(id)
}

/// Saves an edit of the selected date and reloads the stored entry into
/// the session.
pub async fn save_and_refresh(handle: &DiaryHandle, session: &mut SessionState) -> Result<EntryId, FlowError> {
    let draft = session.draft()?;
    let date = draft.date;
    let id = handle.upsert(draft).await?;
    match handle.get_by_date(date).await? {
        Some(entry) => session.load_entry(entry),
        None => session.reset_form(),
    }
    Ok(id)
}

/// Navigates the form to `date`, loading its entry or clearing the form
/// when there is none. Returns whether an entry was found.
pub async fn open_date(handle: &DiaryHandle, session: &mut SessionState, date: EntryDate) -> Result<bool, FlowError> {
    let entry = handle.get_by_date(date).await?;
    session.set_selected_date(date);
    match entry {
        Some(entry) => {
            session.load_entry(entry);
            Ok(true)
        }
        None => {
            session.reset_form();
            Ok(false)
        }
    }
}

/// Moves the form one day forward or back and loads that day, like
/// [`open_date`]. The selection is unchanged when the step would leave the
/// supported range.
pub async fn step_day(handle: &DiaryHandle, session: &mut SessionState, forward: bool) -> Result<bool, FlowError> {
    let current = session.selected_date();
    let date = if forward { current.succ()? } else { current.pred()? };
    open_date(handle, session, date).await
}

/// Deletes the entry currently loaded in the session, if any, and clears
/// the form. Returns the removed id.
pub async fn delete_current(handle: &DiaryHandle, session: &mut SessionState) -> Result<Option<EntryId>, FlowError> {
    let Some(id) = session.current_entry().map(|e| e.id) else {
        return Ok(None);
    };
    handle.delete_by_id(id).await?;
    session.reset_form();
    Ok(Some(id))
}

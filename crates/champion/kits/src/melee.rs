//! Melee champion kit: a three-link slash combo and a stack-gated dash.
//!
//! The slash combo advances its chain only when the swing connects with
//! a target in reach; a whiff drops the combo back to the first link, and
//! the final link arms the slot cooldown. The dash spends one charge and
//! one action point, and locks out transitions from windup until its
//! exit frame.

use champion_core::{
    ActionDispatcher, ActionEvent, ActionStatus, ActionTable, ConfigError, SlotId, Stage,
    default_reset,
};

/// Trigger slot carrying the slash combo table.
pub const SLOT_SLASH: SlotId = SlotId(0);
/// Trigger slot carrying the dash table.
pub const SLOT_DASH: SlotId = SlotId(1);

/// Melee reach of a slash swing.
pub const SLASH_REACH: f32 = 2.5;
/// Number of links in the slash chain.
pub const SLASH_LINKS: usize = 3;
/// Cooldown armed after the final slash link lands.
pub const SLASH_COOLDOWN: u32 = 12;

/// Dash charge capacity.
pub const DASH_STACKS: u32 = 2;
/// Heartbeats per regenerated dash charge.
pub const DASH_STACK_COOLDOWN: u32 = 30;
/// Action points one dash costs.
pub const DASH_POINT_COST: u32 = 1;

/// Registers the full kit on its well-known slots.
pub fn register_kit(dispatcher: &mut ActionDispatcher) -> Result<(), ConfigError> {
    dispatcher.register(SLOT_SLASH, slash_table()?, slash_status())?;
    dispatcher.register(SLOT_DASH, dash_table(), dash_status())?;
    Ok(())
}

/// Ledger for the slash combo: chain as long as the table, cooldown armed
/// by the final link (declared here with zero remaining so the first
/// trigger is not gated).
pub fn slash_status() -> ActionStatus {
    let mut status = ActionStatus::new().with_chain(SLASH_LINKS);
    status.set_cooldown(SLASH_COOLDOWN);
    status.set_remaining_cooldown(0);
    status
}

/// Ledger for the dash: charge pool plus regeneration timer.
pub fn dash_status() -> ActionStatus {
    ActionStatus::new()
        .with_stack(DASH_STACKS)
        .with_stack_cooldown(DASH_STACK_COOLDOWN)
}

/// Builds the three-link slash table.
pub fn slash_table() -> Result<ActionTable, ConfigError> {
    let mut builder = ActionTable::builder();
    for link in 0..SLASH_LINKS {
        builder = builder.stage(slash_stage(link));
    }
    builder.build()
}

fn slash_stage(link: usize) -> Stage {
    let is_final = link + 1 == SLASH_LINKS;
    Stage::new()
        .on(ActionEvent::SetTrigger, move |d| {
            let hit = d.acquire_target(SLASH_REACH).is_some();
            if let Some(status) = d.active_status_mut() {
                if hit {
                    status.advance_chain();
                    if is_final {
                        status.begin_cooldown();
                    }
                } else {
                    // Whiffed: the combo drops back to the opener.
                    status.set_chain_index(0);
                }
            }
            tracing::debug!(link, hit, "slash link triggered");
            d.notify_status_changed();
        })
        .on(ActionEvent::Standby, |d| {
            // Windup cannot be interrupted by other slots.
            if let Some(context) = d.active_context_mut() {
                context.restrict_transition = true;
            }
        })
        .on(ActionEvent::Exit, |d| {
            if let Some(context) = d.active_context_mut() {
                context.restrict_transition = false;
            }
        })
        .on(ActionEvent::TransitionOccurred, |d| d.release_active())
        .on_shared(ActionEvent::CleanUp, default_reset())
}

/// Builds the single-stage dash table.
pub fn dash_table() -> ActionTable {
    ActionTable::single(
        Stage::new()
            .on(ActionEvent::SetTrigger, |d| {
                let funded = d.action_points_mut().spend(DASH_POINT_COST);
                let charged = funded
                    && d
                        .active_status_mut()
                        .map(|status| status.spend_stack())
                        .unwrap_or(false);
                if !charged {
                    if funded {
                        // Charge was the missing piece; give the point back.
                        d.action_points_mut().restore(DASH_POINT_COST);
                    }
                    tracing::debug!("dash refused: out of charges or points");
                    d.reset_from_cast();
                    return;
                }
                if let Some(context) = d.active_context_mut() {
                    context.restrict_transition = true;
                }
                d.notify_status_changed();
            })
            .on(ActionEvent::Exit, |d| {
                if let Some(context) = d.active_context_mut() {
                    context.restrict_transition = false;
                }
            })
            .on(ActionEvent::TransitionOccurred, |d| d.release_active())
            .on_shared(ActionEvent::CleanUp, default_reset()),
    )
}

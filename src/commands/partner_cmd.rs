use super::Resource;
use crate::form::{ConfirmedDelete, Submission};
use crate::models::partner::{Downline, Member};
use crate::query::ListController;
use crate::AppState;

pub const DOWNLINES: Resource = Resource::new("downlines", "/downlines");
pub const MEMBERS: Resource = Resource::new("members", "/members");

pub fn downline_list(state: &AppState) -> ListController<Downline> {
    DOWNLINES.list(state)
}

pub async fn save_downline(state: &AppState, submission: &Submission) -> Result<Downline, String> {
    DOWNLINES.submit(state, submission, &[]).await
}

pub async fn delete_downline(state: &AppState, target: ConfirmedDelete) -> Result<(), String> {
    DOWNLINES.delete(state, target, &[]).await
}

pub fn member_list(state: &AppState) -> ListController<Member> {
    MEMBERS.list(state)
}

pub async fn save_member(state: &AppState, submission: &Submission) -> Result<Member, String> {
    MEMBERS.submit(state, submission, &[]).await
}

pub async fn delete_member(state: &AppState, target: ConfirmedDelete) -> Result<(), String> {
    MEMBERS.delete(state, target, &[]).await
}

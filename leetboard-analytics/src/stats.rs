use crate::model::UserRecord;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryStats<'a> {
    pub total_users: usize,
    /// Mean of `total_solved`, rounded half up. Zero for an empty batch.
    pub average_solved: u64,
    /// First record holding the maximum `total_solved`.
    pub top_performer: Option<&'a UserRecord>,
    /// Records with at least one solve in the last seven days.
    pub active_users: usize,
}

pub fn compute_stats(records: &[UserRecord]) -> SummaryStats<'_> {
    let mut solved_sum: u128 = 0;
    let mut top_performer: Option<&UserRecord> = None;
    let mut active_users = 0;

    for record in records {
        solved_sum += u128::from(record.profile.total_solved);

        match top_performer {
            Some(best) if record.profile.total_solved <= best.profile.total_solved => {}
            _ => top_performer = Some(record),
        }

        if record.consistency.recent_activity.last_7_days > 0 {
            active_users += 1;
        }
    }

    SummaryStats {
        total_users: records.len(),
        average_solved: rounded_mean(solved_sum, records.len()),
        top_performer,
        active_users,
    }
}

fn rounded_mean(sum: u128, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }

    let count = count as u128;
    let mean = (sum * 2 + count) / (count * 2);
    u64::try_from(mean).unwrap_or(u64::MAX)
}

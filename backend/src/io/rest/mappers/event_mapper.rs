use crate::domain::models::EventOccurrence as DomainEvent;
use shared::EventOccurrence as SharedEvent;

pub struct EventMapper;

impl EventMapper {
    pub fn to_dto(domain: DomainEvent) -> SharedEvent {
        SharedEvent {
            id: domain.id,
            recurrence_id: domain.recurrence_id,
            expense_id: domain.expense_id,
            summary: domain.summary,
            date: domain.date.format("%Y-%m-%d").to_string(),
            amount: domain.amount,
            frequency: domain.frequency.as_str().to_string(),
            total: domain.total,
            excluded: domain.excluded,
        }
    }
}

pub mod account_mapper;
pub mod calendar_mapper;
pub mod event_mapper;
pub mod expense_mapper;

pub use account_mapper::AccountMapper;
pub use calendar_mapper::CalendarMapper;
pub use event_mapper::EventMapper;
pub use expense_mapper::ExpenseMapper;

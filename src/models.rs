pub mod booking;
pub use booking::Booking;
pub mod payment;
pub use payment::{FirstInstallmentSource, MonthlyPayments, PaymentEvent, ScheduledPayment};
pub mod period;
pub use period::YearMonth;
pub mod report;
pub use report::{DashboardSummary, MonthlyReport, TrendPoint};

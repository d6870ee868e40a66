pub mod revenue_service;
pub mod report_service;
pub use report_service::ReportService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod export_service;
pub use export_service::ExportService;

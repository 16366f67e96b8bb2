//! Equipment inventory service

use crate::{
    api::equipment::{EquipmentItem, InventoryReport},
    error::AppResult,
    models::equipment::{CreateEquipment, EquipmentRecord},
    repository::Repository,
};

/// Flat days-per-month constant for the consumption projection
const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Full inventory with the power summary, records in creation order
    pub async fn inventory(&self) -> AppResult<InventoryReport> {
        let records = self.repository.equipment.list_all().await?;
        Ok(build_report(records))
    }

    /// Add a record and return its assigned id
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<i32> {
        self.repository.equipment.insert(data).await
    }
}

/// Summarize records into the inventory report. Aggregates are rounded to
/// two decimals; per-item raw fields pass through unrounded. An empty
/// inventory yields zeros, not an error.
fn build_report(records: Vec<EquipmentRecord>) -> InventoryReport {
    let count = records.len();
    let total_power: f64 = records.iter().map(|r| r.rated_power).sum();
    let average_daily_usage = if count > 0 {
        records.iter().map(|r| r.daily_usage_hours).sum::<f64>() / count as f64
    } else {
        0.0
    };
    let estimated_monthly_consumption: f64 = records
        .iter()
        .map(|r| r.rated_power * r.daily_usage_hours * DAYS_PER_MONTH)
        .sum();

    InventoryReport {
        count,
        total_power: round2(total_power),
        average_daily_usage: round2(average_daily_usage),
        estimated_monthly_consumption: round2(estimated_monthly_consumption),
        items: records.into_iter().map(EquipmentItem::from).collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, rated_power: f64, daily_usage_hours: f64) -> EquipmentRecord {
        EquipmentRecord {
            id,
            name: format!("device-{}", id),
            rated_power,
            daily_usage_hours,
            category: None,
            notes: None,
            age_years: None,
            efficiency_label: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_report_for_empty_inventory_is_all_zeros() {
        let report = build_report(vec![]);
        assert_eq!(report.count, 0);
        assert_eq!(report.total_power, 0.0);
        assert_eq!(report.average_daily_usage, 0.0);
        assert_eq!(report.estimated_monthly_consumption, 0.0);
        assert!(report.items.is_empty());
    }

    #[test]
    fn test_report_sums_and_averages() {
        // 100W at 2h/day plus 50W at 4h/day over a 30-day month
        let report = build_report(vec![record(1, 100.0, 2.0), record(2, 50.0, 4.0)]);
        assert_eq!(report.count, 2);
        assert_eq!(report.total_power, 150.0);
        assert_eq!(report.average_daily_usage, 3.0);
        assert_eq!(report.estimated_monthly_consumption, 12000.0);
    }

    #[test]
    fn test_report_rounds_aggregates_to_two_decimals() {
        let report = build_report(vec![record(1, 10.004, 1.0), record(2, 20.003, 2.0)]);
        assert_eq!(report.total_power, 30.01);
        assert_eq!(report.average_daily_usage, 1.5);
    }

    #[test]
    fn test_report_keeps_creation_order() {
        let report = build_report(vec![record(1, 1.0, 1.0), record(2, 1.0, 1.0)]);
        assert_eq!(report.items[0].name, "device-1");
        assert_eq!(report.items[1].name, "device-2");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(12345.6789), 12345.68);
    }
}

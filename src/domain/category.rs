//! Transaction directions, the closed category set, and the policy tying them together.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Whether money flows into or out of the business.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Income => "INCOME",
            Direction::Expense => "EXPENSE",
        }
    }

    /// Accepts the machine code in any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Some(Direction::Income),
            "EXPENSE" => Some(Direction::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Closed set of ledger categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    RoomRevenue,
    FoodBeverage,
    SpaService,
    OtherIncome,
    Utilities,
    StaffSalary,
    Marketing,
    Maintenance,
    Supplies,
    TaxFee,
    SoftwareSubscription,
    OfficeSupplies,
    CleaningSupplies,
}

const INCOME_CATEGORIES: &[Category] = &[
    Category::RoomRevenue,
    Category::FoodBeverage,
    Category::SpaService,
    Category::OtherIncome,
];

const EXPENSE_CATEGORIES: &[Category] = &[
    Category::Utilities,
    Category::StaffSalary,
    Category::Marketing,
    Category::Maintenance,
    Category::Supplies,
    Category::TaxFee,
    Category::SoftwareSubscription,
    Category::OfficeSupplies,
    Category::CleaningSupplies,
];

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Category::RoomRevenue => "ROOM_REVENUE",
            Category::FoodBeverage => "FOOD_BEVERAGE",
            Category::SpaService => "SPA_SERVICE",
            Category::OtherIncome => "OTHER_INCOME",
            Category::Utilities => "UTILITIES",
            Category::StaffSalary => "STAFF_SALARY",
            Category::Marketing => "MARKETING",
            Category::Maintenance => "MAINTENANCE",
            Category::Supplies => "SUPPLIES",
            Category::TaxFee => "TAX_FEE",
            Category::SoftwareSubscription => "SOFTWARE_SUBSCRIPTION",
            Category::OfficeSupplies => "OFFICE_SUPPLIES",
            Category::CleaningSupplies => "CLEANING_SUPPLIES",
        }
    }

    /// Display label in the business language.
    pub fn label(&self) -> &'static str {
        match self {
            Category::RoomRevenue => "ค่าห้องพัก",
            Category::FoodBeverage => "อาหารและเครื่องดื่ม",
            Category::SpaService => "สปาและนวด",
            Category::OtherIncome => "รายได้อื่นๆ",
            Category::Utilities => "ค่าสาธารณูปโภค (น้ำ/ไฟ/เน็ต)",
            Category::StaffSalary => "เงินเดือนและค่าแรง",
            Category::Marketing => "การตลาด/ค่าคอมมิชชั่น OTA",
            Category::Maintenance => "ค่าซ่อมบำรุง",
            Category::Supplies => "วัสดุอุปกรณ์/เครื่องใช้",
            Category::TaxFee => "ภาษีและค่าธรรมเนียม",
            Category::SoftwareSubscription => "ค่าซอฟต์แวร์/แอปพลิเคชัน",
            Category::OfficeSupplies => "วัสดุสำนักงาน",
            Category::CleaningSupplies => "วัสดุทำความสะอาด",
        }
    }

    /// Direction this category belongs to.
    pub fn direction(&self) -> Direction {
        if INCOME_CATEGORIES.contains(self) {
            Direction::Income
        } else {
            Direction::Expense
        }
    }

    pub fn all() -> impl Iterator<Item = Category> {
        INCOME_CATEGORIES
            .iter()
            .chain(EXPENSE_CATEGORIES.iter())
            .copied()
    }

    /// Resolves either the machine code or the display label.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::all().find(|category| {
            category.code().eq_ignore_ascii_case(trimmed) || category.label() == trimmed
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static table of the categories permitted for each direction.
pub struct CategoryPolicy;

impl CategoryPolicy {
    pub fn categories_for(direction: Direction) -> &'static [Category] {
        match direction {
            Direction::Income => INCOME_CATEGORIES,
            Direction::Expense => EXPENSE_CATEGORIES,
        }
    }

    pub fn is_allowed(direction: Direction, category: Category) -> bool {
        Self::categories_for(direction).contains(&category)
    }

    pub fn validate(direction: Direction, category: Category) -> Result<(), LedgerError> {
        if Self::is_allowed(direction, category) {
            Ok(())
        } else {
            Err(LedgerError::Validation(format!(
                "category `{}` is not valid for {} transactions",
                category.code(),
                direction
            )))
        }
    }
}

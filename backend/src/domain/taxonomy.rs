//! Static department → category → subcategory taxonomy.

use super::ticket::TicketValidationError;
use super::user::Department;

/// A category and the subcategories filed under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Category label.
    pub name: &'static str,
    /// Subcategory labels.
    pub subcategories: &'static [&'static str],
}

const fn category(name: &'static str, subcategories: &'static [&'static str]) -> Category {
    Category {
        name,
        subcategories,
    }
}

const ADMIN: &[Category] = &[
    category(
        "Office Facility",
        &["AC/Lighting Issues", "Desk Setup", "Cleanliness", "Power Outage", "Pest Control"],
    ),
    category(
        "IT Assets",
        &["Laptop/Desktop Request", "Accessory Request", "Disposal Request"],
    ),
    category(
        "ID Card & Access",
        &["ID Card Issue/Loss", "Door Access Request", "Visitor Pass", "Biometric Issue"],
    ),
    category(
        "Travel & Transport",
        &["Cab Booking", "Travel Reimbursement", "Itinerary Change"],
    ),
    category(
        "Stationery & Supplies",
        &["New Request", "Refill Request", "Printer Ink Request"],
    ),
    category(
        "Housekeeping",
        &["Cleaning Request", "Pantry Supplies", "Water Dispenser Issues"],
    ),
    category("Maintenance", &["Furniture Repair", "Electrical Issue", "Plumbing"]),
];

const HR: &[Category] = &[
    category(
        "Leave & Attendance",
        &["Leave Balance Query", "Attendance Correction", "Comp Off Request"],
    ),
    category("Employee Records", &["Document Request", "Name/Address Update"]),
    category("Onboarding", &["Laptop Allocation", "Document Submission"]),
    category("Exit Process", &["Clearance", "Final Settlement"]),
    category("Policy & Compliance", &["Leave Policy", "Code of Conduct"]),
    category("Employee Benefits", &["Insurance", "Wellness Program"]),
];

const FINANCE: &[Category] = &[
    category("Reimbursements", &["Travel", "Food", "WFH Setup"]),
    category(
        "Payroll & Salary",
        &["Salary Discrepancy", "Payslip Request", "Tax Declaration Help", "PF Issues"],
    ),
    category("Vendor Payments", &["Invoice Submission", "PO Status"]),
    category("Taxation", &["Form 16", "Investment Proof", "TDS Query"]),
    category("Accounts Payable", &["Payment Follow-up", "Bank Details Update"]),
    category("Accounts Receivable", &["Invoice Follow-up", "Receipt Confirmation"]),
    category("Procurement Support", &["PO Creation", "Software Request"]),
];

/// Categories offered for `department`.
pub fn categories(department: Department) -> &'static [Category] {
    match department {
        Department::Admin => ADMIN,
        Department::Finance => FINANCE,
        Department::Hr => HR,
    }
}

/// Check an optional category/subcategory pair against `department`.
///
/// A category on its own is accepted; a subcategory requires its category.
pub fn validate(
    department: Department,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Result<(), TicketValidationError> {
    let Some(category_name) = category else {
        return match subcategory {
            Some(_) => Err(TicketValidationError::SubcategoryWithoutCategory),
            None => Ok(()),
        };
    };
    let found = categories(department)
        .iter()
        .find(|entry| entry.name == category_name)
        .ok_or_else(|| TicketValidationError::UnknownCategory {
            department,
            category: category_name.to_owned(),
        })?;
    match subcategory {
        Some(sub) if !found.subcategories.contains(&sub) => {
            Err(TicketValidationError::UnknownSubcategory {
                category: category_name.to_owned(),
                subcategory: sub.to_owned(),
            })
        }
        _ => Ok(()),
    }
}

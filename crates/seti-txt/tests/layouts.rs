//! Line layout of every table, column by column.

use seti_model::{
    Amount, Childbirth, Coverage, EmergencyCare, EmergencyProduction, Expenditure,
    HealthResources, HospitalDischarge, HospitalStay, OutpatientCare, Procedures, Record,
    RecordHeader, Referrals, ServiceStratum, Surgery, Surveillance,
};
use seti_txt::render_line;

fn header() -> RecordHeader {
    RecordHeader::new("202602", "12345678", "87654321")
}

fn stratum() -> ServiceStratum {
    ServiceStratum {
        ups_code: "301601".to_string(),
        age_group: "05".to_string(),
        gender: "2".to_string(),
    }
}

fn coverage() -> Coverage {
    Coverage {
        poverty_level: "3".to_string(),
        funding_source: "4".to_string(),
    }
}

fn line(record: impl Into<Record>) -> String {
    render_line(&record.into())
}

#[test]
fn test_health_resources_layout() {
    let record = HealthResources {
        header: header(),
        physical_consulting_rooms: 1,
        functional_consulting_rooms: 2,
        hospital_beds: 3,
        total_physicians: 4,
        serums_physicians: 5,
        resident_physicians: 6,
        nurses: 7,
        dentists: 8,
        psychologists: 9,
        nutritionists: 10,
        medical_technologists: 11,
        midwives: 12,
        pharmacists: 13,
        support_staff: 14,
        other_professionals: 15,
        operative_ambulances: 16,
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|1|2|3|4|5|6|7|8|9|10|11|12|13|14|15|16");
}

#[test]
fn test_outpatient_care_layout() {
    let record = OutpatientCare {
        header: header(),
        stratum: stratum(),
        total_patients: 11,
        total_appointments: 22,
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|11|22|3|4");
}

#[test]
fn test_emergency_care_layout() {
    let record = EmergencyCare {
        header: header(),
        stratum: stratum(),
        total_patients: 11,
        total_appointments: 22,
        priority: "1".to_string(),
        destination: "6".to_string(),
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|11|22|1|6|3|4");
}

#[test]
fn test_hospital_discharge_layout() {
    let record = HospitalDischarge {
        header: header(),
        stratum: stratum(),
        total_patients: 11,
        total_appointments: 22,
        exit_type: "7".to_string(),
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|11|22|7|3|4");
}

#[test]
fn test_hospital_stay_layout() {
    let record = HospitalStay {
        header: header(),
        stratum: stratum(),
        total_patients: 11,
        total_appointments: 22,
        stay_days: 33,
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|11|22|33|3|4");
}

#[test]
fn test_emergency_production_layout() {
    let record = EmergencyProduction {
        header: header(),
        stratum: stratum(),
        total_patients: 11,
        total_appointments: 22,
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|11|22|3|4");
}

#[test]
fn test_childbirth_layout() {
    let record = Childbirth {
        header: header(),
        total_deliveries: 50,
        complicated_deliveries: 10,
        live_births: 49,
        still_births: 1,
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|50|10|49|1");
}

#[test]
fn test_surveillance_layout() {
    let record = Surveillance {
        header: header(),
        ups_code: "202201".to_string(),
        surveillance_code: "I02".to_string(),
        event_count: 2,
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|202201|I02|2");
}

#[test]
fn test_procedures_layout() {
    let record = Procedures {
        header: header(),
        stratum: stratum(),
        total_patients: 10,
        total_procedures: 50,
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|10|50|3|4");
}

#[test]
fn test_surgery_layout() {
    let record = Surgery {
        header: header(),
        stratum: stratum(),
        total_patients: 3,
        total_interventions: 4,
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|3|4|3|4");
}

#[test]
fn test_referrals_layout() {
    let record = Referrals {
        header: header(),
        stratum: stratum(),
        total_patients: 5,
        total_referrals: 6,
        coverage: coverage(),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|301601|05|2|5|6|3|4");
}

#[test]
fn test_expenditure_layout() {
    let record = Expenditure {
        header: header(),
        funding_source: "1".to_string(),
        budget_category: "2.3.1".to_string(),
        executed_amount: Amount::from_cents(500_000),
    };
    insta::assert_snapshot!(line(record), @"202602|12345678|87654321|1|2.3.1|5000.00");
}

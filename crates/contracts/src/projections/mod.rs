pub mod p900_maintenance_report;

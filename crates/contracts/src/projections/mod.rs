pub mod p900_dashboard_view;

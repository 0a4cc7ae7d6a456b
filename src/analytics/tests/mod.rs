mod analytics_service_tests;

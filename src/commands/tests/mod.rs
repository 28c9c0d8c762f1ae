mod compare_tests;

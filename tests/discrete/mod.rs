mod distribution_test;

mod gbn_scenarios;
mod scenario_spec;
mod sim_time;
mod trace_log;

//! Sample `ovs-ofctl dump-flows` output for the spine/pod test topology
//!
//! ```text
//!   tester --- ssw:2  ssw:1 ===trunk=== psw:1  psw:3 --- testee
//!                                              psw:4 --- testee2
//! ```

pub const SPINE: &str = "\
NXST_FLOW reply (xid=0x4):
 cookie=0x0, duration=120.431s, table=0, n_packets=12, n_bytes=1176, idle_age=3, priority=100,in_port=2,dl_dst=00:00:00:00:00:03 actions=output:1
 cookie=0x0, duration=120.431s, table=0, n_packets=12, n_bytes=1176, idle_age=3, priority=100,in_port=1,dl_dst=00:00:00:00:00:01 actions=output:2
 cookie=0x0, duration=120.431s, table=0, n_packets=2, n_bytes=84, idle_age=60, priority=10,in_port=2 actions=FLOOD
";

pub const POD: &str = "\
NXST_FLOW reply (xid=0x4):
 cookie=0x0, duration=118.902s, table=0, n_packets=12, n_bytes=1176, idle_age=3, priority=100,in_port=1,dl_dst=00:00:00:00:00:03 actions=output:3
 cookie=0x0, duration=118.902s, table=0, n_packets=12, n_bytes=1176, idle_age=3, priority=100,in_port=3 actions=output:1
 cookie=0x0, duration=118.902s, table=0, n_packets=0, n_bytes=0, idle_age=118, priority=100,in_port=1,dl_vlan=10 actions=mod_vlan_vid:20,output:4
 cookie=0x0, duration=118.902s, table=0, n_packets=0, n_bytes=0, idle_age=118, priority=100,in_port=4 actions=output:1
 cookie=0x0, duration=118.902s, table=0, n_packets=0, n_bytes=0, idle_age=118, priority=50,in_port=3 actions=output:3
";

/// Dump with noise, partial rows and a rule without output
pub const NOISY_SPINE: &str = "\
NXST_FLOW reply (xid=0x4):

 cookie=0x0, duration=1.0s, table=0, priority=0 actions=drop
 cookie=0x0, duration=1.0s, table=0, priority=100,in_port=5 actions=CONTROLLER:65535
this line is not a flow
 COOKIE=0x1, duration=1.0s, table=0, priority=100,in_port=2 actions=output:1
 cookie=0x0, in_port=abc actions=output:zz
";

/// Resolve a service name printed by netstat in place of a numeric port.
///
/// Names are matched exactly, as they appear in the Windows `services` file.
pub fn standard_port(name: &str) -> Option<u16> {
    let port = match name {
        "echo" => 7,
        "ftp-data" => 20,
        "ftp" => 21,
        "ssh" => 22,
        "telnet" => 23,
        "smtp" => 25,
        "domain" => 53,
        "http" => 80,
        "kerberos" => 88,
        "pop3" => 110,
        "epmap" => 135,
        "netbios-ns" => 137,
        "netbios-dgm" => 138,
        "netbios-ssn" => 139,
        "imap" => 143,
        "snmp" => 161,
        "ldap" => 389,
        "https" => 443,
        "microsoft-ds" => 445,
        "isakmp" => 500,
        "nfsd-status" => 1110,
        "ms-sql-s" => 1433,
        "ms-sna-server" => 1477,
        "ms-sna-base" => 1478,
        "wins" => 1512,
        "ingreslock" => 1524,
        "pptconference" => 1711,
        "pptp" => 1723,
        "msiccp" => 1731,
        "remote-winsock" => 1745,
        "ms-streaming" => 1755,
        "msmq" => 1801,
        "msnp" => 1863,
        "ssdp" => 1900,
        "knetd" => 2053,
        "ms-wbt-server" => 3389,
        "man" => 9535,
        _ => return None,
    };
    Some(port)
}

/// Builds a response to `query`: same id and question, QR/RD/RA set,
/// `rcode` in the low nibble, one A record per `(ttl, ip)` pair.
pub fn answer_to(query: &[u8], rcode: u8, records: &[(u32, [u8; 4])]) -> Vec<u8> {
    build_answer(query, rcode, records, false)
}

/// Same as [`answer_to`] with the TC bit set.
pub fn truncated_answer_to(query: &[u8], records: &[(u32, [u8; 4])]) -> Vec<u8> {
    build_answer(query, 0, records, true)
}

fn build_answer(query: &[u8], rcode: u8, records: &[(u32, [u8; 4])], truncated: bool) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(query.len() + records.len() * 16);
    response.extend_from_slice(&query[0..2]);
    response.push(0x81 | if truncated { 0x02 } else { 0x00 });
    response.push(0x80 | (rcode & 0x0f));
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[12..]);

    for (ttl, ip) in records {
        response.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01]);
        response.extend_from_slice(&ttl.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x04]);
        response.extend_from_slice(ip);
    }

    response
}

/// Wire form of `name` as a sequence of length-prefixed labels.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    bytes
}

/// Reads the question name out of a query for assertions.
pub fn question_name(query: &[u8]) -> String {
    let mut labels = Vec::new();
    let mut pos = 12;
    while pos < query.len() && query[pos] != 0 {
        let len = query[pos] as usize;
        labels.push(String::from_utf8_lossy(&query[pos + 1..pos + 1 + len]).into_owned());
        pos += 1 + len;
    }
    labels.join(".")
}

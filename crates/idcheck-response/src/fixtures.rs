//! Canned service payloads used by the test suites.

/// A service-level error.
pub const ERROR: &str = r#"<?xml version="1.0"?>
<response>
  <error>Your IP address is not registered. Please call IDology Customer Service (770-984-4697).</error>
</response>"#;

/// Well-formed, but neither an error nor a results node.
pub const UNKNOWN: &str = r#"<?xml version="1.0"?>
<response>
  <status>maintenance</status>
</response>"#;

/// Not well-formed at all.
pub const MALFORMED: &str = "<response><results><key>result.match</results>";

pub const NO_MATCH: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5342330</id-number>
  <summary-result>
    <key>id.failure</key>
    <message>FAIL</message>
  </summary-result>
  <results>
    <key>result.no.match</key>
    <message>ID Not Located</message>
  </results>
</response>"#;

pub const MATCH_FOUND: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5342889</id-number>
  <summary-result>
    <key>id.success</key>
    <message>PASS</message>
  </summary-result>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <eligible-for-questions>true</eligible-for-questions>
</response>"#;

/// A match that the service itself marks as not eligible.
pub const MATCH_NOT_ELIGIBLE: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5342890</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <eligible-for-questions>false</eligible-for-questions>
</response>"#;

/// A match with no `<eligible-for-questions>` node.
pub const MATCH_WITHOUT_ELIGIBILITY: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5342891</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
</response>"#;

/// A match carrying two qualifiers that do not disqualify.
pub const MATCH_WITH_TWO_QUALIFIERS: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5922431</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <qualifiers>
    <qualifier>
      <key>resultcode.thin.file</key>
      <message>Thin File</message>
    </qualifier>
    <qualifier>
      <key>resultcode.address.velocity</key>
      <message>Address Velocity Alert</message>
    </qualifier>
  </qualifiers>
  <eligible-for-questions>true</eligible-for-questions>
</response>"#;

/// Qualifier key/message pairs that disqualify a subject.
pub const DISQUALIFYING: [(&str, &str); 6] = [
  ("resultcode.subject.deceased", "Subject is Deceased"),
  ("resultcode.ssn.not.available", "SSN unavailable"),
  ("resultcode.ssn.does.not.match", "SSN4 Does Not Match"),
  ("resultcode.ssn.issued.prior.to.dob", "SSN Issued Prior to DOB"),
  ("resultcode.ssn.invalid", "SSN Is Invalid"),
  ("resultcode.single.address", "Single Address in File"),
];

/// An eligible match carrying a single qualifier.
pub fn match_with_qualifier(key: &str, message: &str) -> String {
  format!(
    r#"<?xml version="1.0"?>
<response>
  <id-number>5922430</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <qualifiers>
    <qualifier>
      <key>{key}</key>
      <message>{message}</message>
    </qualifier>
  </qualifiers>
  <eligible-for-questions>true</eligible-for-questions>
</response>"#
  )
}

pub const QUESTIONS: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5343388</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <questions>
    <question>
      <prompt>With which name are you associated?</prompt>
      <type>alternate.names.phone</type>
      <answer>ENDO</answer>
      <answer>ENRIQUEZ</answer>
      <answer>EATON</answer>
      <answer>ECHOLS</answer>
      <answer>EPPS</answer>
      <answer>None of the above</answer>
    </question>
    <question>
      <prompt>Where was your social security number issued?</prompt>
      <type>ssn.issued.in</type>
      <answer>Michigan</answer>
      <answer>Wyoming</answer>
      <answer>Arkansas</answer>
      <answer>North Carolina</answer>
      <answer>Illinois</answer>
      <answer>None of the above</answer>
    </question>
    <question>
      <prompt>In which county have you lived?</prompt>
      <type>current.county</type>
      <answer>PICKENS</answer>
      <answer>ST MARY</answer>
      <answer>FRANKLIN</answer>
      <answer>ANDREWS</answer>
      <answer>MIAMI</answer>
      <answer>None of the above</answer>
    </question>
  </questions>
</response>"#;

/// A match whose `<questions>` container holds no questions.
pub const EMPTY_QUESTIONS: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5343389</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <questions/>
</response>"#;

pub const CHALLENGE_QUESTIONS: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5444900</id-number>
  <results>
    <key>result.match</key>
    <message>Pass</message>
  </results>
  <questions>
    <question>
      <prompt>Which of the following people do you know?</prompt>
      <type>person.known</type>
      <answer>FREDDY JEFFERS</answer>
      <answer>ARTHUR DAVIS</answer>
      <answer>KACIE JACKSON</answer>
      <answer>KRISTA GRIFFIN</answer>
      <answer>MIRIAIN SANCHEZ</answer>
      <answer>None of the above</answer>
    </question>
    <question>
      <prompt>Which street goes with your address number 840?</prompt>
      <type>street.name</type>
      <answer>ROBBIE VW</answer>
      <answer>LUBICH DR</answer>
      <answer>VICTOR WAY</answer>
      <answer>VARSITY CT</answer>
      <answer>VAQUERO DR</answer>
      <answer>None of the above</answer>
    </question>
  </questions>
</response>"#;

/// A first-stage answer submission result.
pub fn verification_result(key: &str, message: &str) -> String {
  format!(
    r#"<?xml version="1.0"?>
<response>
  <id-number>5343388</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <idliveq-result>
    <key>{key}</key>
    <message>{message}</message>
  </idliveq-result>
</response>"#
  )
}

pub const VERIFICATION_TIMEOUT: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5343388</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <idliveq-result>
    <key>result.timeout</key>
    <message>result.timeout</message>
  </idliveq-result>
</response>"#;

/// Both inner nodes present; the error must win.
pub const VERIFICATION_INNER_ERROR: &str = r#"<?xml version="1.0"?>
<response>
  <id-number>5343388</id-number>
  <results>
    <key>result.match</key>
    <message>ID Located</message>
  </results>
  <idliveq-result>
    <key>result.questions.0.incorrect</key>
    <message>All Answers Correct</message>
  </idliveq-result>
  <idliveq-error>
    <key>id.not.eligible.for.questions</key>
    <message>Not Eligible For Questions</message>
  </idliveq-error>
</response>"#;

/// A challenge answer submission result; the service echoes the key as the
/// message.
pub fn challenge_result(key: &str) -> String {
  format!(
    r#"<?xml version="1.0"?>
<response>
  <id-number>5444900</id-number>
  <results>
    <key>result.match</key>
    <message>Pass</message>
  </results>
  <idliveq-challenge-result>
    <key>{key}</key>
    <message>{key}</message>
  </idliveq-challenge-result>
</response>"#
  )
}

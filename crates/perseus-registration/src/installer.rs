//! Schema installation for the registration site.

use perseus_db::Installer;
use perseus_system::FLOOD_TABLE_SCRIPT;

const REGISTRATION_TABLE_SCRIPT: &str = "\
CREATE TABLE IF NOT EXISTS registration (
  rid INT NOT NULL AUTO_INCREMENT COMMENT 'Unique registration ID.',
  name VARCHAR(128) NOT NULL DEFAULT '' COMMENT 'Full name of the registrant.',
  affiliation VARCHAR(128) NOT NULL DEFAULT '' COMMENT 'Affiliation of the registrant.',
  address VARCHAR(128) NOT NULL DEFAULT '' COMMENT 'Registrant address.',
  city VARCHAR(128) NOT NULL DEFAULT '' COMMENT 'Registrant city.',
  state CHAR(2) NOT NULL DEFAULT '' COMMENT 'Registrant state.',
  zip VARCHAR(10) NOT NULL DEFAULT '' COMMENT 'Registrant zip/postal code.',
  country CHAR(2) NOT NULL DEFAULT '' COMMENT 'Registrant country.',
  phone VARCHAR(20) NOT NULL DEFAULT '' COMMENT 'Registrant phone number.',
  fax VARCHAR(20) NOT NULL DEFAULT '' COMMENT 'Registrant fax number.',
  mail VARCHAR(255) NOT NULL DEFAULT '' COMMENT 'Registrant email address.',
  meal TINYINT NOT NULL DEFAULT 0 COMMENT 'Registrant requires a vegetarian meal.',
  dietary_needs VARCHAR(255) DEFAULT '' COMMENT 'Registrant dietary needs.',
  PRIMARY KEY (rid)
) ENGINE=InnoDB DEFAULT CHARSET=utf8 COMMENT='Records registration submissions'";

/// The installer for the registration site: the registrants table plus
/// the flood-control table.
pub fn installer() -> Installer {
	let mut installer = Installer::new();
	installer.register("registration", REGISTRATION_TABLE_SCRIPT);
	installer.register("flood", FLOOD_TABLE_SCRIPT);
	installer
}

#![allow(dead_code)]

/// Small program with two variables and comments on their own lines.
pub const SIMPLE: &str = "/* REXX */

/* Initialize */
info = 1
infoSum = 0

/* Accumulate */
do 10
  infoSum = infoSum + info
end
/* Report */
say 'sum' infoSum

/* Done */
exit
";

pub const CALL: &str = "/* REXX */
call TESTPROC
exit

TESTPROC:
  say 'in testproc'
  return
";

pub const ERRORS: &str = "/* REXX */
x = {
/* stray */ */
say \"open string
say 'open string
/* comment without end
";
